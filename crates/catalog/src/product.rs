//! Product entity and draft validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopadmin_core::{CategoryId, Checker, ProductId, UserId};
use shopadmin_storage::UploadedFile;

/// Upper bound for product prices (inclusive).
pub const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Largest accepted image upload, in kilobytes.
pub const MAX_IMAGE_KB: usize = 2048;

const IMAGE_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/gif",
    "image/webp",
];

/// A catalog product.
///
/// Invariants: `category_id` always references an existing category (enforced
/// at validation time); `image`, when present, is a path previously returned
/// by the public file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: CategoryId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Construct a freshly created product from validated fields.
    pub fn new(fields: ProductFields, image: Option<String>, owner: UserId) -> Self {
        Self {
            id: ProductId::new(),
            title: fields.title,
            description: fields.description,
            price: fields.price,
            image,
            category_id: fields.category_id,
            user_id: owner,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the mutable fields from a validated update.
    ///
    /// Id, owner, creation timestamp and image reference are not touched;
    /// image replacement is a separate, storage-coupled step.
    pub fn apply(&mut self, fields: ProductFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.category_id = fields.category_id;
    }
}

/// Unvalidated product input as it arrives from a form or API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<CategoryId>,
}

/// Sanitized field set produced by validation.
///
/// The category id carried here has been confirmed to exist; constructing
/// this type outside the validation path skips that check, so the service is
/// the only producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: CategoryId,
}

/// Run the repository-independent field rules, leaving results and failures
/// on the shared checker. Category existence is the service's part.
pub(crate) fn check_fields(
    check: &mut Checker,
    draft: &ProductDraft,
) -> (Option<String>, Option<String>, Option<Decimal>) {
    let title = check.required_str("title", &draft.title, 255);
    let description = check.optional_str("description", draft.description.as_deref(), 2000);
    let price = check.required_decimal("price", draft.price, Decimal::ZERO, MAX_PRICE);
    (title, description, price)
}

/// Image upload rules: accepted content type and size cap.
pub(crate) fn check_image(check: &mut Checker, file: &UploadedFile) {
    if !IMAGE_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        check.reject("image", "must be a jpeg, png, jpg, gif, or webp image");
    }
    if file.size_kb() > MAX_IMAGE_KB {
        check.reject("image", format!("may not be larger than {MAX_IMAGE_KB} kilobytes"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(price: Decimal) -> ProductDraft {
        ProductDraft {
            title: "Widget".to_string(),
            description: None,
            price: Some(price),
            category_id: Some(CategoryId::new()),
        }
    }

    #[test]
    fn max_price_is_999999_99() {
        assert_eq!(MAX_PRICE.to_string(), "999999.99");
    }

    #[test]
    fn valid_fields_pass() {
        let mut check = Checker::new();
        let (title, description, price) = check_fields(&mut check, &draft(Decimal::new(999, 2)));
        assert!(!check.has_errors());
        assert_eq!(title.as_deref(), Some("Widget"));
        assert_eq!(description, None);
        assert_eq!(price, Some(Decimal::new(999, 2)));
    }

    #[test]
    fn price_one_million_is_rejected() {
        let mut check = Checker::new();
        check_fields(&mut check, &draft(Decimal::new(100_000_000, 2)));
        assert!(check.into_errors().get("price").is_some());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut check = Checker::new();
        let mut d = draft(Decimal::ONE);
        d.description = Some("d".repeat(2001));
        check_fields(&mut check, &d);
        assert!(check.into_errors().get("description").is_some());
    }

    #[test]
    fn image_type_and_size_rules() {
        let mut check = Checker::new();
        check_image(
            &mut check,
            &UploadedFile::new("notes.pdf", "application/pdf", vec![0; 16]),
        );
        assert!(check.into_errors().get("image").is_some());

        let mut check = Checker::new();
        check_image(
            &mut check,
            &UploadedFile::new("big.png", "image/png", vec![0; (MAX_IMAGE_KB + 1) * 1024]),
        );
        assert!(check.into_errors().get("image").is_some());

        let mut check = Checker::new();
        check_image(
            &mut check,
            &UploadedFile::new("ok.webp", "image/webp", vec![0; 1024]),
        );
        assert!(!check.has_errors());
    }

    proptest! {
        #[test]
        fn any_price_in_range_is_accepted(cents in 0i64..=99_999_999) {
            let mut check = Checker::new();
            let (_, _, price) = check_fields(&mut check, &draft(Decimal::new(cents, 2)));
            prop_assert!(!check.has_errors());
            prop_assert_eq!(price, Some(Decimal::new(cents, 2)));
        }

        #[test]
        fn any_price_above_max_is_rejected(cents in 100_000_000i64..=1_000_000_000) {
            let mut check = Checker::new();
            check_fields(&mut check, &draft(Decimal::new(cents, 2)));
            prop_assert!(check.has_errors());
        }
    }
}
