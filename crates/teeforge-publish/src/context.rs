//! Who is publishing, carried explicitly through the pipeline.

/// Identity of the creator running a publish. Passed into the
/// [`crate::pipeline::Publisher`] rather than read from any ambient
/// session state, so callers and tests control it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorContext {
    pub creator_id: String,
    /// Print-provider shop the products are created under.
    pub shop_id: String,
}

impl CreatorContext {
    pub fn new(creator_id: impl Into<String>, shop_id: impl Into<String>) -> Self {
        Self {
            creator_id: creator_id.into(),
            shop_id: shop_id.into(),
        }
    }

    /// Upload filename carrying the creator id for tracking.
    pub fn upload_file_name(&self, base: &str) -> String {
        format!("creator-{}-{}", self.creator_id, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_carry_the_creator_id() {
        let ctx = CreatorContext::new("abc123", "shop-9");
        assert_eq!(
            ctx.upload_file_name("My Tee-front.png"),
            "creator-abc123-My Tee-front.png"
        );
    }
}
