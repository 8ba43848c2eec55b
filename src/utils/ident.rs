use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 10;

/// Generates an external-facing product identifier such as
/// `product_k3x0q9a7bz`.
///
/// The identifier is distinct from the internal serial primary key and is
/// what clients use to address a product over the API.
pub fn product_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("product_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_shape() {
        let id = product_id();
        let suffix = id.strip_prefix("product_").expect("missing prefix");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        );
    }

    #[test]
    fn test_product_ids_are_unique_enough() {
        let a = product_id();
        let b = product_id();
        assert_ne!(a, b);
    }
}
