//! Property tests for in-memory vector store search ordering.

use askdoc_rag::document::DocumentPoint;
use askdoc_rag::inmemory::InMemoryStore;
use askdoc_rag::vectorstore::VectorStore;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized vector of the given dimension.
fn arb_normalized_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero vector",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a point with a normalized vector and a bounded id.
fn arb_point(dim: usize) -> impl Strategy<Value = DocumentPoint> {
    (0u64..64, "[a-z ]{5,30}", arb_normalized_vector(dim)).prop_map(|(id, content, vector)| {
        DocumentPoint { id, content, source_path: format!("/tmp/{id}.txt"), vector }
    })
}

/// For any set of stored points, search returns at most `top_k` hits and
/// scores never increase from one position to the next.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            points in proptest::collection::vec(arb_point(DIM), 1..20),
            query in arb_normalized_vector(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (hits, unique_count) = rt.block_on(async {
                let store = InMemoryStore::new();
                store.create_collection("test", DIM).await.unwrap();

                let unique_count = {
                    let mut ids: Vec<u64> = points.iter().map(|p| p.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    ids.len()
                };

                store.upsert("test", &points).await.unwrap();
                let hits = store.search("test", &query, top_k).await.unwrap();
                (hits, unique_count)
            });

            // At most top_k, and at most one hit per stored id.
            prop_assert!(hits.len() <= top_k);
            prop_assert!(hits.len() <= unique_count);

            for window in hits.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "hits not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
