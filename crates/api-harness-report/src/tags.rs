//! Test group tags.
//!
//! Tests are filed into the report by prefixed group names:
//! `MC:` main category, `SC:` sub-category, `SECTION:` section tag and
//! `AUTHOR:` author. Other groups are ignored.

const MAIN_CATEGORY: &str = "MC:";
const SUB_CATEGORY: &str = "SC:";
const SECTION: &str = "SECTION:";
const AUTHOR: &str = "AUTHOR:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestTags {
    pub main_category: String,
    pub sub_category: String,
    pub section: String,
    pub author: String,
}

impl TestTags {
    /// Collect tags from group names. A later group overrides an earlier one
    /// with the same prefix; missing tags stay empty.
    ///
    /// ```
    /// use api_harness_report::TestTags;
    ///
    /// let tags = TestTags::from_groups(&["MC:Charges", "SC:Create", "SECTION:Smoke", "AUTHOR:qa", "regression"]);
    /// assert_eq!(tags.main_category, "Charges");
    /// assert_eq!(tags.sub_category, "Create");
    /// assert_eq!(tags.section, "Smoke");
    /// assert_eq!(tags.author, "qa");
    /// ```
    pub fn from_groups<S: AsRef<str>>(groups: &[S]) -> Self {
        let mut tags = TestTags::default();
        for group in groups {
            let group = group.as_ref();
            if let Some(rest) = group.strip_prefix(MAIN_CATEGORY) {
                tags.main_category = rest.to_string();
            } else if let Some(rest) = group.strip_prefix(SUB_CATEGORY) {
                tags.sub_category = rest.to_string();
            } else if let Some(rest) = group.strip_prefix(SECTION) {
                tags.section = rest.to_string();
            } else if let Some(rest) = group.strip_prefix(AUTHOR) {
                tags.author = rest.to_string();
            }
        }
        tags
    }
}
