use std::collections::HashSet;

/// Type alias for vector identifiers as the vendor stores them.
pub type VectorId = String;

/// Dense vector values. The service works in `f64` on the wire.
pub type Values = Vec<f64>;

/// Collapses duplicate ids while keeping first-occurrence order.
pub(crate) fn dedup_ids<I, S>(ids: I) -> Vec<VectorId>
where
    I: IntoIterator<Item = S>,
    S: Into<VectorId>,
{
    let mut seen: HashSet<VectorId> = HashSet::new();
    let mut out: Vec<VectorId> = Vec::new();
    for id in ids {
        let id = id.into();
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids_keeps_first_occurrence() {
        let ids = dedup_ids(["b", "a", "b", "c", "a"]);
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dedup_ids_large_set() {
        let ids: Vec<String> = (0..20_000).chain(0..20_000).map(|i| format!("id-{}", i)).collect();
        let deduped = dedup_ids(ids);
        assert_eq!(deduped.len(), 20_000);
        assert_eq!(deduped[0], "id-0");
        assert_eq!(deduped[19_999], "id-19999");
    }

    #[test]
    fn test_dedup_ids_empty() {
        let ids = dedup_ids(Vec::<String>::new());
        assert!(ids.is_empty());
    }
}
