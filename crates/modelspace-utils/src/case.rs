//! Identifier case conversion used to derive table names from model names.

use convert_case::{Case, Casing};

/// Convert a camel or Pascal case identifier into snake case.
///
/// `CustomTableName` becomes `custom_table_name`.
#[must_use]
pub fn snake_case(ident: &str) -> String {
    ident.to_case(Case::Snake)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_becomes_snake_case() {
        assert_eq!(snake_case("CustomTableName"), "custom_table_name");
        assert_eq!(snake_case("AnimalWithSomething"), "animal_with_something");
    }

    #[test]
    fn single_word_is_lowercased() {
        assert_eq!(snake_case("Contact"), "contact");
        assert_eq!(snake_case("contact"), "contact");
    }

    #[test]
    fn camel_case_becomes_snake_case() {
        assert_eq!(snake_case("nestedFake"), "nested_fake");
    }

    #[test]
    fn empty_ident_stays_empty() {
        assert_eq!(snake_case(""), "");
    }
}
