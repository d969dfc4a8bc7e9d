use paperdb_chunk::CorpusSelector;
use paperdb_core::dataset::DatasetRow;

fn pool(n: usize) -> Vec<DatasetRow> {
    (0..n)
        .map(|i| DatasetRow {
            title: format!("Paper {i}"),
            content: format!("content of paper {i}"),
        })
        .collect()
}

#[test]
fn required_plus_sample_makes_the_corpus() {
    let pool = pool(60);
    let required: Vec<String> = (0..13).map(|i| format!("Paper {i}")).collect();

    let selector = CorpusSelector::new(40, 123);
    let corpus = selector.select(&pool, &required).expect("select");

    assert_eq!(corpus.len(), 53);
    // Required papers come first, in pool order.
    for (i, title_idx) in (0..13).enumerate() {
        assert_eq!(corpus[i].text, format!("content of paper {title_idx}"));
    }
    // Each required paper appears exactly once.
    for i in 0..13 {
        let text = format!("content of paper {i}");
        assert_eq!(corpus.iter().filter(|d| d.text == text).count(), 1);
    }
}

#[test]
fn same_seed_same_sample() {
    let pool = pool(60);
    let required: Vec<String> = (0..13).map(|i| format!("Paper {i}")).collect();

    let a = CorpusSelector::new(40, 123).select(&pool, &required).expect("a");
    let b = CorpusSelector::new(40, 123).select(&pool, &required).expect("b");
    let texts_a: Vec<&str> = a.iter().map(|d| d.text.as_str()).collect();
    let texts_b: Vec<&str> = b.iter().map(|d| d.text.as_str()).collect();
    assert_eq!(texts_a, texts_b, "fixed seed reproduces the sample");

    let c = CorpusSelector::new(40, 124).select(&pool, &required).expect("c");
    let texts_c: Vec<&str> = c.iter().map(|d| d.text.as_str()).collect();
    assert_ne!(texts_a, texts_c, "different seed draws a different sample");
}

#[test]
fn missing_required_title_is_an_error() {
    let pool = pool(10);
    let required = vec!["Paper 3".to_string(), "No Such Paper".to_string()];

    let err = CorpusSelector::new(2, 1).select(&pool, &required).unwrap_err();
    assert!(err.to_string().contains("No Such Paper"), "{err}");
}

#[test]
fn short_candidate_pool_fails_instead_of_truncating() {
    let pool = pool(10);
    let required = vec!["Paper 0".to_string()];

    // 9 candidates left, asking for 40.
    let err = CorpusSelector::new(40, 123).select(&pool, &required).unwrap_err();
    assert!(err.to_string().contains("cannot sample 40"), "{err}");
}

#[test]
fn sample_excludes_required_titles() {
    let pool = pool(20);
    let required: Vec<String> = (0..5).map(|i| format!("Paper {i}")).collect();

    let corpus = CorpusSelector::new(15, 7).select(&pool, &required).expect("select");
    assert_eq!(corpus.len(), 20);
    // All 20 pool rows are present exactly once: 5 required + all 15 candidates.
    for i in 0..20 {
        let text = format!("content of paper {i}");
        assert_eq!(corpus.iter().filter(|d| d.text == text).count(), 1);
    }
}
