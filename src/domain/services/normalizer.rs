//! Request normalization
//!
//! Cleans the raw reference tokens a user put on the delivery list and
//! classifies each one as a tree path or an artifact coordinate. Duplicate
//! tokens survive normalization; the uniqueness guard removes them after
//! resolution.

use crate::domain::value_objects::Coordinate;
use crate::error::ResolveError;

/// A cleaned and classified delivery request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedRequest {
    /// Tokens referencing the version-controlled tree, in input order
    pub tree_paths: Vec<String>,
    /// Tokens referencing the artifact store, in input order
    pub artifact_coordinates: Vec<String>,
}

impl NormalizedRequest {
    /// Every token of the request, tree paths first
    pub fn all_tokens(&self) -> impl Iterator<Item = &String> {
        self.tree_paths.iter().chain(self.artifact_coordinates.iter())
    }
}

/// Normalize and classify the raw token list.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyRequest`] when no usable token remains -
/// a delivery must reference at least one thing.
pub fn normalize_request(tokens: &[String]) -> Result<NormalizedRequest, ResolveError> {
    let mut request = NormalizedRequest::default();
    for raw in tokens {
        let token = normalize_token(raw);
        if token.is_empty() {
            continue;
        }
        if Coordinate::parse(&token).is_some() {
            request.artifact_coordinates.push(token);
        } else {
            request.tree_paths.push(token);
        }
    }
    if request.tree_paths.is_empty() && request.artifact_coordinates.is_empty() {
        tracing::error!("empty delivery list passed");
        return Err(ResolveError::EmptyRequest);
    }
    Ok(request)
}

/// Strip the noise users routinely leave on tree tokens:
/// surrounding whitespace, leading `./`, trailing `/` and `/.`.
fn normalize_token(raw: &str) -> String {
    let mut token = raw.trim();
    while let Some(rest) = token.strip_prefix("./") {
        token = rest;
    }
    loop {
        if let Some(rest) = token.strip_suffix("/.") {
            token = rest;
        } else if let Some(rest) = token.strip_suffix('/') {
            token = rest;
        } else {
            break;
        }
    }
    if token == "." {
        return String::new();
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_tree_and_artifact_tokens() {
        let request =
            normalize_request(&tokens(&["c/file1.txt", "g:a:v:zip", "doc", "g1:a1:v1"])).unwrap();
        assert_eq!(request.tree_paths, vec!["c/file1.txt", "doc"]);
        assert_eq!(request.artifact_coordinates, vec!["g:a:v:zip", "g1:a1:v1"]);
    }

    #[test]
    fn strips_leading_dot_slash() {
        let request = normalize_request(&tokens(&["./c"])).unwrap();
        assert_eq!(request.tree_paths, vec!["c"]);
    }

    #[test]
    fn strips_trailing_slash_and_dot() {
        let request = normalize_request(&tokens(&["c/", "d/."])).unwrap();
        assert_eq!(request.tree_paths, vec!["c", "d"]);
    }

    #[test]
    fn trims_whitespace() {
        let request = normalize_request(&tokens(&["  c/file1.txt  "])).unwrap();
        assert_eq!(request.tree_paths, vec!["c/file1.txt"]);
    }

    #[test]
    fn keeps_duplicates() {
        let request = normalize_request(&tokens(&["c/a.txt", "./c/a.txt"])).unwrap();
        assert_eq!(request.tree_paths, vec!["c/a.txt", "c/a.txt"]);
    }

    #[test]
    fn empty_list_rejected() {
        assert!(matches!(
            normalize_request(&[]),
            Err(ResolveError::EmptyRequest)
        ));
    }

    #[test]
    fn all_blank_tokens_rejected() {
        assert!(matches!(
            normalize_request(&tokens(&["", "  ", "./", "."])),
            Err(ResolveError::EmptyRequest)
        ));
    }

    #[test]
    fn all_tokens_chains_both_classes() {
        let request = normalize_request(&tokens(&["g:a:v", "c"])).unwrap();
        let all: Vec<&String> = request.all_tokens().collect();
        assert_eq!(all, vec!["c", "g:a:v"]);
    }
}
