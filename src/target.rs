//! Request target construction.
//!
//! A request target is the base origin, a normalized resource path and an
//! optional query string. The query is encoded canonically: keys in
//! lexicographic order, one `key=value` pair per value, everything
//! form-urlencoded. Two equal [`ParameterSet`]s always encode to the same
//! string, whatever order their values were added in per key.
//!
//! Paths are passed through as given. Identifier validation is left to the
//! endpoint methods that assemble them.

use std::collections::BTreeMap;

use url::Url;
use url::form_urlencoded;

use crate::Result;

/// Query parameters for a single request, allowing repeated keys.
///
/// Values for the same key keep the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: BTreeMap<String, Vec<String>>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `key`, keeping any values already present.
    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.params.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Replaces every value under `key` with `value`.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        let _previous = self.params.insert(key.into(), vec![value.into()]);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Encodes the set as a query string without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.params {
            for value in values {
                let _ = serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            let _ = set.add(key, value);
        }
        set
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ParameterSet {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Builds the request target for `path` under `base`.
///
/// Exactly one trailing slash is stripped from `base` and all leading and
/// trailing slashes from `path`. An empty path (including a bare `/`) yields
/// `base` unchanged. A `?` is only emitted for a non-empty parameter set.
///
/// # Errors
///
/// Returns a [`Kind::Validation`](crate::error::Kind::Validation) error if
/// `base` is not an absolute URL.
pub fn build_target(base: &str, path: &str, params: Option<&ParameterSet>) -> Result<String> {
    let base = base.strip_suffix('/').unwrap_or(base);
    let mut url = Url::parse(base)?;
    let path = path.trim_matches('/');

    let mut target = if path.is_empty() {
        base.to_owned()
    } else {
        let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
        url.set_path(&joined);
        String::from(url)
    };

    if let Some(params) = params.filter(|params| !params.is_empty()) {
        target.push('?');
        target.push_str(&params.encode());
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    const ORIGIN: &str = "https://api.example.com";

    fn target(path: &str, params: Option<&ParameterSet>) -> String {
        build_target(ORIGIN, path, params).expect("valid origin")
    }

    #[test]
    fn plain_path_is_appended() {
        assert_eq!(
            target("tags/slug/nfl", None),
            "https://api.example.com/tags/slug/nfl"
        );
        assert_eq!(
            target("sports/market-types", None),
            "https://api.example.com/sports/market-types"
        );
    }

    #[test]
    fn empty_and_bare_slash_paths_leave_origin_unchanged() {
        assert_eq!(target("", None), ORIGIN);
        assert_eq!(target("/", None), ORIGIN);
        assert_eq!(target("//", None), ORIGIN);
    }

    #[test]
    fn slashes_are_trimmed_on_both_sides() {
        assert_eq!(target("/a/", None), "https://api.example.com/a");
        assert_eq!(target("/markets", None), "https://api.example.com/markets");
        assert_eq!(target("tags/", None), "https://api.example.com/tags");
        assert_eq!(
            target("/tags/slug/abc", None),
            "https://api.example.com/tags/slug/abc"
        );
    }

    #[test]
    fn one_trailing_slash_is_stripped_from_base() {
        let built = build_target("https://api.example.com/", "teams", None).expect("valid origin");
        assert_eq!(built, "https://api.example.com/teams");

        let nested =
            build_target("https://api.example.com/v1/", "teams/", None).expect("valid origin");
        assert_eq!(nested, "https://api.example.com/v1/teams");
    }

    #[test]
    fn repeated_keys_encode_once_per_value_in_key_order() {
        let mut params = ParameterSet::new();
        let _ = params
            .add("limit", "10")
            .add("league", "nfl")
            .add("league", "ncaa");

        assert_eq!(
            target("teams", Some(&params)),
            "https://api.example.com/teams?league=nfl&league=ncaa&limit=10"
        );
    }

    #[test]
    fn keys_are_sorted_regardless_of_insertion_order() {
        let params = ParameterSet::from([
            ("offset", "0"),
            ("name", "patriots"),
            ("league", "nfl"),
            ("abbreviation", "NE"),
            ("limit", "10"),
            ("name", "eagles"),
            ("league", "ncaa"),
        ]);

        assert_eq!(
            params.encode(),
            "abbreviation=NE&league=nfl&league=ncaa&limit=10&name=patriots&name=eagles&offset=0"
        );
    }

    #[test]
    fn values_are_percent_escaped() {
        let params = ParameterSet::from([
            ("name", "st. louis & co"),
            ("end_date_max", "2025-12-31T23:59:59Z"),
        ]);

        assert_eq!(
            params.encode(),
            "end_date_max=2025-12-31T23%3A59%3A59Z&name=st.+louis+%26+co"
        );
    }

    #[test]
    fn empty_or_absent_params_emit_no_question_mark() {
        let empty = ParameterSet::new();

        assert_eq!(target("sports", Some(&empty)), "https://api.example.com/sports");
        assert_eq!(target("sports", None), "https://api.example.com/sports");
    }

    #[test]
    fn params_apply_to_bare_origin() {
        let params = ParameterSet::from([("limit", "10"), ("offset", "0")]);

        assert_eq!(
            target("", Some(&params)),
            "https://api.example.com?limit=10&offset=0"
        );
    }

    #[test]
    fn negative_values_pass_through() {
        let params = ParameterSet::from([("limit", "-5"), ("offset", "0")]);

        assert_eq!(
            target("teams", Some(&params)),
            "https://api.example.com/teams?limit=-5&offset=0"
        );
    }

    #[test]
    fn set_replaces_previous_values() {
        let mut params = ParameterSet::from([("order", "id"), ("order", "volume")]);
        let _ = params.set("order", "volume");

        assert_eq!(params.get("order"), Some(&["volume".to_owned()][..]));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn unparseable_base_is_a_validation_error() {
        let error = build_target("not a url", "teams", None).expect_err("relative base");

        assert_eq!(error.kind(), Kind::Validation);
    }
}
