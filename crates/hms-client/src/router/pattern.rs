use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    /// `:name(.*)*`, swallows the rest of the path (possibly nothing).
    CatchAll(String),
}

/// Compiled form of a route path such as `/patients/edit/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|seg| match seg.strip_prefix(':') {
                Some(rest) => match rest.find('(') {
                    Some(idx) => Segment::CatchAll(rest[..idx].to_string()),
                    None => Segment::Param(rest.to_string()),
                },
                None => Segment::Static(seg.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Match an already normalized path, returning the captured params.
    /// Static segments compare ASCII case-insensitively; params are
    /// percent-decoded.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split(path).collect();
        let mut params = BTreeMap::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    let rest = parts.get(idx..).unwrap_or_default().join("/");
                    params.insert(name.clone(), decode(&rest));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    let actual = parts.get(idx)?;
                    if !actual.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(idx)?;
                    params.insert(name.clone(), decode(value));
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

/// Malformed escapes are kept as written.
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip query string and fragment, collapse duplicate and trailing slashes.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let joined = split(&path[..end]).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_param_segments() {
        let p = RoutePattern::parse("/patients/edit/:id");
        let params = p.matches("/patients/edit/9").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("9"));
        assert!(p.matches("/patients/edit").is_none());
        assert!(p.matches("/patients/edit/9/extra").is_none());
        assert!(p.matches("/doctors/edit/9").is_none());
    }

    #[test]
    fn static_segments_ignore_ascii_case() {
        let p = RoutePattern::parse("/patients/edit/:id");
        assert_eq!(p.matches("/Patients/EDIT/9").unwrap()["id"], "9");
    }

    #[test]
    fn params_are_percent_decoded() {
        let p = RoutePattern::parse("/patients/edit/:id");
        assert_eq!(p.matches("/patients/edit/a%20b").unwrap()["id"], "a b");
        assert_eq!(
            p.matches("/patients/edit/%E5%BC%A0").unwrap()["id"],
            "张"
        );
        // invalid UTF-8 after decoding stays raw
        assert_eq!(p.matches("/patients/edit/%FF").unwrap()["id"], "%FF");

        let all = RoutePattern::parse("/:pathMatch(.*)*");
        assert_eq!(all.matches("/a%2Fb/c").unwrap()["pathMatch"], "a/b/c");
    }

    #[test]
    fn root_matches_only_root() {
        let p = RoutePattern::parse("/");
        assert!(p.matches("/").unwrap().is_empty());
        assert!(p.matches("/x").is_none());
    }

    #[test]
    fn catch_all_captures_rest() {
        let p = RoutePattern::parse("/:pathMatch(.*)*");
        assert!(p.is_catch_all());
        assert_eq!(p.matches("/a/b/c").unwrap()["pathMatch"], "a/b/c");
        assert_eq!(p.matches("/").unwrap()["pathMatch"], "");
    }

    #[test]
    fn normalize_drops_query_fragment_and_extra_slashes() {
        assert_eq!(normalize("/patients/?page=2"), "/patients");
        assert_eq!(normalize("//visits//details/3#top"), "/visits/details/3");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("dashboard"), "/dashboard");
    }
}
