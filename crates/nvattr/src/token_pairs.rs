//! `token=value` option lists, e.g. `display=:0,format=json`.
//!
//! The whole list is validated before any pair is handed to the callback, so
//! a malformed list applies nothing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenPairError {
    #[error("missing '=' in '{0}'")]
    MissingEqualSign(String),

    #[error("empty token in '{0}'")]
    EmptyToken(String),
}

/// Splits `s` on `separator` and calls `handler(token, value)` for each
/// `token=value` segment, trimmed. Empty segments are skipped; values may be
/// empty and may themselves contain `=`.
pub fn parse_token_value_pairs<F>(s: &str, separator: char, mut handler: F) -> Result<usize, TokenPairError>
where
    F: FnMut(&str, &str),
{
    let mut pairs = Vec::new();
    for segment in s.split(separator) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (token, value) = segment
            .split_once('=')
            .ok_or_else(|| TokenPairError::MissingEqualSign(segment.to_string()))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenPairError::EmptyToken(segment.to_string()));
        }
        pairs.push((token, value.trim()));
    }

    for (token, value) in &pairs {
        handler(token, value);
    }
    Ok(pairs.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(s: &str) -> Result<Vec<(String, String)>, TokenPairError> {
        let mut out = Vec::new();
        parse_token_value_pairs(s, ',', |t, v| out.push((t.to_string(), v.to_string())))?;
        Ok(out)
    }

    #[test]
    fn test_pairs_are_trimmed_and_ordered() {
        let pairs = collect(" display = :0 , format=json").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("display".to_string(), ":0".to_string()),
                ("format".to_string(), "json".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_segments_and_values() {
        assert_eq!(collect("").unwrap(), vec![]);
        assert_eq!(collect(",,a=,").unwrap(), vec![("a".into(), "".into())]);
        assert_eq!(collect("k=a=b").unwrap(), vec![("k".into(), "a=b".into())]);
    }

    #[test]
    fn test_malformed_list_applies_nothing() {
        let mut calls = 0;
        let err = parse_token_value_pairs("a=1,b", ',', |_, _| calls += 1).unwrap_err();
        assert_eq!(err, TokenPairError::MissingEqualSign("b".into()));
        assert_eq!(calls, 0);

        assert_eq!(
            collect("a=1, =2").unwrap_err(),
            TokenPairError::EmptyToken("=2".into())
        );
    }

    #[test]
    fn test_custom_separator() {
        let n = parse_token_value_pairs("a=1;b=2", ';', |_, _| {}).unwrap();
        assert_eq!(n, 2);
    }
}
