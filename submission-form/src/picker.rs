// Result of the platform image picker, handed back across the screen boundary.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    Canceled,
    Picked(Vec<PathBuf>),
}

impl PickResult {
    /// Local reference of the first selected asset, if any
    pub fn first_asset(&self) -> Option<String> {
        match self {
            PickResult::Canceled => None,
            PickResult::Picked(assets) => assets
                .first()
                .map(|path| path.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_asset_only() {
        let result = PickResult::Picked(vec![PathBuf::from("/tmp/a.jpg"), PathBuf::from("/tmp/b.jpg")]);
        assert_eq!(result.first_asset(), Some("/tmp/a.jpg".to_string()));
    }

    #[test]
    fn test_canceled_and_empty() {
        assert_eq!(PickResult::Canceled.first_asset(), None);
        assert_eq!(PickResult::Picked(Vec::new()).first_asset(), None);
    }
}
