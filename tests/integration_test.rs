// Integration tests for Platewise
use platewise_core::{
    Catalog, CategoricalAttribute, Error, FeatureVector, QueryProfile, RestaurantRecord,
};
use platewise_schema::{EncoderBuilder, FeatureEncoder};
use platewise_similarity::{CatalogSnapshot, Recommender};
use platewise_storage::{CatalogStore, StoreConfig};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

fn encoder() -> Arc<FeatureEncoder> {
    Arc::new(
        EncoderBuilder::new()
            .categories(CategoricalAttribute::Location, ["X", "Y", "BTM"])
            .categories(CategoricalAttribute::RestType, ["Casual Dining", "Cafe"])
            .categories(
                CategoricalAttribute::Cuisines,
                ["Italian, Pizza", "North Indian", "Chinese"],
            )
            .categories(CategoricalAttribute::ListedInType, ["Delivery", "Dine-out"])
            .build()
            .unwrap(),
    )
}

fn ten_rows_at_x() -> Catalog {
    let records = (1..=10)
        .map(|i| {
            let cuisines = if i % 2 == 0 { "Italian, Pizza" } else { "North Indian" };
            RestaurantRecord::new(format!("Place {}", i), "X", i as f32 * 100.0, 10 * i)
                .with_rest_type("Casual Dining")
                .with_cuisines(cuisines)
                .with_listed_in_type("Delivery")
        })
        .collect();
    Catalog::new(records)
}

#[test]
fn test_filter_applies_cost_ceiling() {
    let encoder = encoder();
    let snapshot = CatalogSnapshot::encode(ten_rows_at_x(), &encoder);
    let recommender = Recommender::new(encoder);

    let matches = recommender
        .recommend_by_filter(&snapshot, &QueryProfile::new("X", 400.0))
        .unwrap();

    assert_eq!(matches.len(), 4);
    assert!(matches.iter().all(|r| r.cost <= 400.0));
    let names: Vec<&str> = matches.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Place 1", "Place 2", "Place 3", "Place 4"]);
}

#[test]
fn test_filter_cuisine_is_case_insensitive_substring() {
    let encoder = encoder();
    let snapshot = CatalogSnapshot::encode(ten_rows_at_x(), &encoder);
    let recommender = Recommender::new(encoder);

    let profile = QueryProfile::new("X", 1000.0).with_cuisines("italian");
    let matches = recommender.recommend_by_filter(&snapshot, &profile).unwrap();

    assert_eq!(matches.len(), 5);
    assert!(matches.iter().all(|r| r.cuisines == "Italian, Pizza"));
}

#[test]
fn test_similarity_page_is_distinct_and_sorted_by_votes() {
    let encoder = encoder();
    let records = (0..20)
        .map(|i| {
            // Four names, each used five times
            RestaurantRecord::new(format!("Chain {}", i % 4), "Y", 300.0 + i as f32, 50 + i)
                .with_cuisines("Chinese")
        })
        .collect();
    let snapshot = CatalogSnapshot::encode(Catalog::new(records), &encoder);
    let recommender = Recommender::new(encoder);

    let profile = QueryProfile::new("Y", 300.0)
        .with_cuisines("Chinese")
        .with_page(1);
    let first = recommender.recommend_by_similarity(&snapshot, &profile).unwrap();

    assert!(first.len() <= 4);
    assert_eq!(first.total_candidates, 20);

    let names: HashSet<&str> = first.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), first.len());
    assert!(first.items.windows(2).all(|w| w[0].votes >= w[1].votes));

    let second = recommender.recommend_by_similarity(&snapshot, &profile).unwrap();
    let a: Vec<&str> = first.items.iter().map(|r| r.name.as_str()).collect();
    let b: Vec<&str> = second.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(a, b);
}

#[test]
fn test_page_past_the_end_is_empty() {
    let encoder = encoder();
    let records = (0..5)
        .map(|i| RestaurantRecord::new(format!("R{}", i), "BTM", 400.0, 1 + i))
        .collect();
    let snapshot = CatalogSnapshot::encode(Catalog::new(records), &encoder);
    let recommender = Recommender::new(encoder);

    let page = recommender
        .recommend_by_similarity(&snapshot, &QueryProfile::new("BTM", 400.0).with_page(100))
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.number, 100);
    assert_eq!(page.total_candidates, 5);
}

#[test]
fn test_unknown_location_is_not_found_on_both_paths() {
    let encoder = encoder();
    let snapshot = CatalogSnapshot::encode(ten_rows_at_x(), &encoder);
    let recommender = Recommender::new(encoder);
    let profile = QueryProfile::new("Atlantis", 1000.0);

    assert!(matches!(
        recommender.recommend_by_similarity(&snapshot, &profile),
        Err(Error::NotFound)
    ));
    assert!(matches!(
        recommender.recommend_by_filter(&snapshot, &profile),
        Err(Error::NotFound)
    ));
}

#[test]
fn test_unpopular_rows_are_never_returned() {
    let encoder = encoder();
    let catalog = Catalog::new(vec![
        RestaurantRecord::new("Busy", "X", 200.0, 12),
        RestaurantRecord::new("Quiet", "X", 200.0, 0),
        RestaurantRecord::new("Elsewhere", "Y", 200.0, 99),
    ]);
    let snapshot = CatalogSnapshot::encode(catalog, &encoder);
    let recommender = Recommender::new(encoder);
    let profile = QueryProfile::new("X", 500.0);

    let page = recommender.recommend_by_similarity(&snapshot, &profile).unwrap();
    let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Busy"]);

    let filtered = recommender.recommend_by_filter(&snapshot, &profile).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Busy");
}

#[test]
fn test_unknown_category_encodes_zero_block() {
    let encoder = encoder();
    let profile = QueryProfile::new("X", 300.0).with_cuisines("Martian");
    let vector = encoder.encode_query(&profile);

    let block = encoder.schema().block(CategoricalAttribute::Cuisines);
    assert!(vector.as_slice()[block].iter().all(|v| *v == 0.0));

    let location = encoder.schema().block(CategoricalAttribute::Location);
    assert_eq!(vector.as_slice()[location].iter().sum::<f32>(), 1.0);
}

#[test]
fn test_query_and_record_vectors_align() {
    let encoder = encoder();
    let record = RestaurantRecord::new("Roma", "X", 450.0, 30)
        .with_rest_type("Cafe")
        .with_cuisines("Italian, Pizza")
        .with_listed_in_type("Dine-out");
    let profile = QueryProfile::new("X", 450.0)
        .with_rest_type("Cafe")
        .with_cuisines("Italian, Pizza")
        .with_listed_in_type("Dine-out");

    let q = encoder.encode_query(&profile);
    let r = encoder.encode_record(&record);

    assert_eq!(q.dim(), r.dim());
    assert_eq!(q.dim(), encoder.dim());
    assert!((q.cosine_similarity(&r) - 1.0).abs() < 1e-6);
    assert!((q.cosine_similarity(&q) - 1.0).abs() < 1e-6);
    assert_eq!(q.cosine_similarity(&FeatureVector::zeros(q.dim())), 0.0);
}

#[test]
fn test_store_serves_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("cleaned_data.csv");
    let vocabulary_path = dir.path().join("vocabulary.json");

    let mut csv = std::fs::File::create(&catalog_path).unwrap();
    writeln!(
        csv,
        "name,online_order,book_table,rate,votes,location,rest_type,cuisines,cost,listed_in(type)"
    )
    .unwrap();
    writeln!(csv, "Jalsa,Yes,Yes,4.1/5,775,Banashankari,Casual Dining,\"North Indian, Mughlai\",800,Buffet").unwrap();
    writeln!(csv, "Spice Elephant,Yes,No,4.1/5,787,Banashankari,Casual Dining,\"Chinese, Thai\",800,Buffet").unwrap();
    writeln!(csv, "Addhuri,No,No,NEW,0,Banashankari,Quick Bites,South Indian,150,Buffet").unwrap();
    drop(csv);

    std::fs::write(
        &vocabulary_path,
        r#"{
            "version": 1,
            "attributes": [
                {"name": "location", "categories": ["Banashankari"]},
                {"name": "rest_type", "categories": ["Casual Dining", "Quick Bites"]},
                {"name": "cuisines", "categories": ["North Indian, Mughlai", "Chinese, Thai", "South Indian"]},
                {"name": "listed_in(type)", "categories": ["Buffet"]}
            ],
            "continuous": [{"name": "cost"}]
        }"#,
    )
    .unwrap();

    let store = CatalogStore::open(&StoreConfig {
        catalog_path: catalog_path.clone(),
        vocabulary_path,
    })
    .unwrap();
    assert_eq!(store.snapshot().len(), 3);

    let recommender = Recommender::new(store.encoder());
    let snapshot = store.snapshot();
    let page = recommender
        .recommend_by_similarity(&snapshot, &QueryProfile::new("Banashankari", 800.0))
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Spice Elephant", "Jalsa"]);

    let filtered = recommender
        .recommend_by_filter(
            &snapshot,
            &QueryProfile::new("Banashankari", 1000.0).with_cuisines("mughlai"),
        )
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Jalsa");
    assert_eq!(filtered[0].rate, Some(4.1));

    std::fs::write(
        &catalog_path,
        "name,location,rest_type,cuisines,listed_in(type),cost,votes\n\
         Only One,Banashankari,Quick Bites,South Indian,Buffet,200,5\n",
    )
    .unwrap();
    assert_eq!(store.reload().unwrap(), 1);
    assert_eq!(store.snapshot().len(), 1);
}
