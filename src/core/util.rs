//! Generic utilities used across core modules.

/// Filter items by case-insensitive query matching on two string fields.
/// Returns all items when query is empty.
pub fn filter_by_query<'a, T, F>(items: &'a [T], query: &str, get_fields: F) -> Vec<&'a T>
where
    F: Fn(&'a T) -> (&str, &str),
{
    if query.is_empty() {
        return items.iter().collect();
    }
    let q = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let (a, b) = get_fields(item);
            a.to_lowercase().contains(&q) || b.to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_empty_query_returns_all() {
        let items = vec!["bitbox", "rssbox"];
        let out = filter_by_query(&items, "", |s| (s, ""));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn filter_case_insensitive_on_either_field() {
        let items = vec![("bitbox", "bitbox.exe"), ("rssbox", "rssbox.exe")];
        let out = filter_by_query(&items, "RSS", |t| (t.0, t.1));
        assert_eq!(out, vec![&("rssbox", "rssbox.exe")]);
        let out = filter_by_query(&items, "bitbox.exe", |t| (t.0, t.1));
        assert_eq!(out, vec![&("bitbox", "bitbox.exe")]);
    }

    #[test]
    fn filter_no_match_returns_empty() {
        let items = vec!["bitbox", "rssbox"];
        assert!(filter_by_query(&items, "xyz", |s| (s, "")).is_empty());
    }
}
