//! Path templates and URL resolution.
//!
//! Resource paths are written as templates such as `/posts/{postId}/comments`.
//! Placeholders are filled positionally: the first value replaces the first
//! `{...}` token, regardless of its name.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Substitutes every `{placeholder}` in `template` with the next value of `params`.
///
/// # Errors
///
/// - [`DomainError::MissingPathParameter`] if the template has more placeholders than values
/// - [`DomainError::UnusedPathParameter`] if values are left over
/// - [`DomainError::InvalidPathTemplate`] on an unterminated or empty placeholder
pub fn expand_path(template: &str, params: &[String]) -> DomainResult<String> {
    let mut expanded = String::with_capacity(template.len());
    let mut values = params.iter();
    let mut used = 0;
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| DomainError::InvalidPathTemplate(template.to_string()))?;
        let placeholder = &after[..close];
        if placeholder.is_empty() || placeholder.contains('{') {
            return Err(DomainError::InvalidPathTemplate(template.to_string()));
        }
        let value = values
            .next()
            .ok_or_else(|| DomainError::MissingPathParameter {
                template: template.to_string(),
                placeholder: placeholder.to_string(),
            })?;
        expanded.push_str(value);
        used += 1;
        rest = &after[close + 1..];
    }
    expanded.push_str(rest);

    if used < params.len() {
        return Err(DomainError::UnusedPathParameter {
            template: template.to_string(),
            expected: used,
            actual: params.len(),
        });
    }
    Ok(expanded)
}

/// Joins `path` onto `base_url`.
///
/// A `path` that already is an absolute `http(s)` URL is returned as-is, so
/// links found in response bodies can be followed directly.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if the result does not parse.
pub fn resolve_url(base_url: &str, path: &str) -> DomainResult<Url> {
    let joined = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.is_empty() {
        base_url.to_string()
    } else {
        let base = base_url.trim_end_matches('/');
        if path.starts_with('/') || path.starts_with('?') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    };
    Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))
}
