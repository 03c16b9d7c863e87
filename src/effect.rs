use crate::favorites::FavoriteEntry;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadRegions,
    LoadCatalog { region: String },
    LoadTypes,
    LoadTypeMembers { name: String },
    LoadDetail { query: String, locale: String },
    LoadEvolutions { url: String },
    LoadFavorites,
    PersistFavorites { entries: Vec<FavoriteEntry> },
}
