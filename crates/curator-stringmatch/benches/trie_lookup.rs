use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curator_stringmatch::{DictEntry, Dictionary, KeyNormalization};

fn build_dictionary(size: usize) -> Dictionary {
    let mut dict = Dictionary::new(KeyNormalization::Whitespace);
    for i in 0..size {
        let key = format!("entity number {i}");
        dict.get_or_insert_with(&key, || DictEntry::new(key.clone()))
            .put(if i % 2 == 0 { "LOC" } else { "ORG" });
    }
    dict
}

fn bench_lookup(c: &mut Criterion) {
    let dict = build_dictionary(10_000);
    let text = "entity number 4242 and entity  number 17 went to entity number 9999 ".repeat(20);
    let starts: Vec<usize> = text
        .char_indices()
        .filter(|&(i, _)| i == 0 || text.as_bytes()[i - 1] == b' ')
        .map(|(i, _)| i)
        .collect();

    c.bench_function("trie_lookup_10k_entries", |b| {
        b.iter(|| {
            let mut hits = 0;
            for &start in &starts {
                if dict.lookup(black_box(&text), start).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("trie_build_10k_entries", |b| {
        b.iter(|| black_box(build_dictionary(10_000)))
    });
}

criterion_group!(benches, bench_lookup, bench_build);
criterion_main!(benches);
