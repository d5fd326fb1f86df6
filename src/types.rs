//! Shared types used across DOCREC.
//! Includes the session image identifier (`ImageId`) and the document type
//! mask (`TypeMask`) used to select which document types a session recognizes.

/// Identifier assigned by a session to a registered image.
pub type ImageId = i32;

/// A document type mask: one or more comma-separated patterns where `*`
/// matches any run of characters. `*` alone matches every type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMask {
    patterns: Vec<String>,
}

impl TypeMask {
    /// Parse a mask string. Returns `None` if the string contains no
    /// non-empty patterns.
    pub fn parse(mask: &str) -> Option<Self> {
        let patterns: Vec<String> = mask
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if patterns.is_empty() {
            None
        } else {
            Some(TypeMask { patterns })
        }
    }

    /// Merge another mask into this one.
    pub fn extend(&mut self, other: TypeMask) {
        self.patterns.extend(other.patterns);
    }

    /// Whether a document type name is selected by this mask.
    pub fn matches(&self, type_name: &str) -> bool {
        self.patterns.iter().any(|p| wildcard_match(p, type_name))
    }

    /// The raw patterns of this mask.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl std::fmt::Display for TypeMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.patterns.join(","))
    }
}

// Iterative glob match supporting only `*`; backtracks to the last star on
// mismatch.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let v: Vec<char> = value.chars().collect();
    let (mut pi, mut vi) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while vi < v.len() {
        if pi < p.len() && p[pi] != '*' && p[pi] == v[vi] {
            pi += 1;
            vi += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, vi));
            pi += 1;
        } else if let Some((sp, sv)) = star {
            pi = sp + 1;
            vi = sv + 1;
            star = Some((sp, sv + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_everything() {
        let mask = TypeMask::parse("*").unwrap();
        assert!(mask.matches("passport"));
        assert!(mask.matches(""));
        assert!(mask.matches("rus.snils.type1"));
    }

    #[test]
    fn exact_and_prefix_patterns() {
        let mask = TypeMask::parse("passport").unwrap();
        assert!(mask.matches("passport"));
        assert!(!mask.matches("passport_old"));

        let mask = TypeMask::parse("rus.*").unwrap();
        assert!(mask.matches("rus.passport"));
        assert!(!mask.matches("deu.passport"));
    }

    #[test]
    fn infix_star_backtracks() {
        let mask = TypeMask::parse("*.passport.*").unwrap();
        assert!(mask.matches("rus.passport.national"));
        assert!(!mask.matches("rus.snils.type1"));
    }

    #[test]
    fn comma_separated_patterns() {
        let mask = TypeMask::parse("passport, idcard").unwrap();
        assert!(mask.matches("passport"));
        assert!(mask.matches("idcard"));
        assert!(!mask.matches("invoice"));
    }

    #[test]
    fn empty_mask_rejected() {
        assert!(TypeMask::parse("").is_none());
        assert!(TypeMask::parse(" , ,").is_none());
    }

    #[test]
    fn extend_merges_patterns() {
        let mut mask = TypeMask::parse("passport").unwrap();
        mask.extend(TypeMask::parse("idcard").unwrap());
        assert!(mask.matches("idcard"));
    }
}
