use crate::domain::entities::asset::Asset;

/// Ordered, mutable sequence of assets.
///
/// Order is significant: it is the concatenation order and the write order.
/// Filter chains are run with `Pipeline::run` (see `application::filter`).
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub(crate) assets: Vec<Asset>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Remove every asset. Only sequence-replacing filters should call this.
    pub fn truncate(&mut self) {
        self.assets.clear();
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Mutable access to each asset; the sequence itself stays fixed.
    pub fn assets_mut(&mut self) -> impl Iterator<Item = &mut Asset> {
        self.assets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn into_assets(self) -> Vec<Asset> {
        self.assets
    }
}

impl FromIterator<Asset> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Asset>>(iter: I) -> Self {
        Self {
            assets: iter.into_iter().collect(),
        }
    }
}
