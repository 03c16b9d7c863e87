//! PokeAPI client and normalization layer.
//!
//! Every public accessor collapses failure into a renderable fallback
//! (empty list, `None`) instead of surfacing an error. Screens always
//! have something to draw.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::state::{CreatureDetail, CreatureSummary, EvolutionNode};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Real chains top out at three stages; the cap only bounds malformed
/// documents.
const MAX_CHAIN_DEPTH: usize = 20;
const MOVE_LIMIT: usize = 4;

pub const FALLBACK_DESCRIPTION: &str = "Sin descripción.";

/// Region name to upstream pokedex id. The catalog endpoints are keyed by
/// pokedex id, not region name.
pub const REGION_CATALOGS: [(&str, u16); 10] = [
    ("kanto", 2),
    ("johto", 3),
    ("hoenn", 4),
    ("sinnoh", 5),
    ("unova", 8),
    ("kalos", 12),
    ("alola", 16),
    ("galar", 27),
    ("hisui", 29),
    ("paldea", 31),
];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogResponse {
    pokemon_entries: Vec<CatalogEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogEntry {
    pokemon_species: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeResponse {
    pokemon: Vec<TypeMemberSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeMemberSlot {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct CreatureResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<TypeSlot>,
    moves: Vec<MoveSlot>,
    species: ApiResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

pub fn sprite_url(id: u32) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

pub fn catalog_id(region: &str) -> Option<u16> {
    let region = region.to_ascii_lowercase();
    REGION_CATALOGS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, id)| *id)
}

pub fn region_names() -> Vec<String> {
    REGION_CATALOGS
        .iter()
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Last non-empty path segment of a resource locator, parsed as an id.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').split('/').next_back()?.parse().ok()
}

/// Region list, canonical entries first in their fixed order, then any
/// of the ten the upstream listing omitted. The fixed list doubles as
/// the fallback when the request fails.
pub async fn fetch_regions() -> Vec<String> {
    match list_regions().await {
        Ok(regions) => regions,
        Err(_) => region_names(),
    }
}

async fn list_regions() -> Result<Vec<String>, ApiError> {
    let response: ListResponse = fetch_json(&format!("{API_BASE}/region/")).await?;
    let upstream: HashSet<String> = response
        .results
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    let mut regions: Vec<String> = region_names()
        .into_iter()
        .filter(|name| upstream.contains(name))
        .collect();
    for name in region_names() {
        if !regions.contains(&name) {
            regions.push(name);
        }
    }
    Ok(regions)
}

/// Catalog for a region; unknown region or any upstream failure yields an
/// empty list. Entries whose species locator does not parse are dropped.
pub async fn fetch_catalog(region: &str) -> Vec<CreatureSummary> {
    match list_catalog(region).await {
        Ok(entries) => entries,
        Err(_) => Vec::new(),
    }
}

async fn list_catalog(region: &str) -> Result<Vec<CreatureSummary>, ApiError> {
    let id = catalog_id(region).ok_or_else(|| ApiError::UnknownRegion(region.to_string()))?;
    let response: CatalogResponse = fetch_json(&format!("{API_BASE}/pokedex/{id}")).await?;
    Ok(response
        .pokemon_entries
        .into_iter()
        .filter_map(summary_from_entry)
        .collect())
}

fn summary_from_entry(entry: CatalogEntry) -> Option<CreatureSummary> {
    let id = id_from_url(&entry.pokemon_species.url)?;
    Some(CreatureSummary {
        id,
        name: entry.pokemon_species.name,
        sprite_url: sprite_url(id),
    })
}

pub async fn fetch_types() -> Vec<String> {
    match list_types().await {
        Ok(types) => types,
        Err(_) => Vec::new(),
    }
}

async fn list_types() -> Result<Vec<String>, ApiError> {
    let response: ListResponse = fetch_json(&format!("{API_BASE}/type/")).await?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| name != "unknown" && name != "shadow")
        .collect())
}

/// Member names for one elemental type. Failure collapses to an empty
/// set: the filter shows zero matches instead of hanging in the pending
/// state.
pub async fn fetch_type_members(name: &str) -> HashSet<String> {
    match list_type_members(name).await {
        Ok(members) => members,
        Err(_) => HashSet::new(),
    }
}

async fn list_type_members(name: &str) -> Result<HashSet<String>, ApiError> {
    let response: TypeResponse = fetch_json(&format!("{API_BASE}/type/{name}")).await?;
    Ok(response
        .pokemon
        .into_iter()
        .map(|slot| slot.pokemon.name)
        .collect())
}

/// Base record plus the species record it points at, merged into one
/// detail. `None` when either request fails or the creature is absent
/// upstream.
pub async fn fetch_detail(query: &str, locale: &str) -> Option<CreatureDetail> {
    load_detail(query, locale).await.ok()
}

async fn load_detail(query: &str, locale: &str) -> Result<CreatureDetail, ApiError> {
    let creature: CreatureResponse = fetch_json(&format!("{API_BASE}/pokemon/{query}")).await?;
    let species: SpeciesResponse = fetch_json(&creature.species.url).await?;
    Ok(detail_from_parts(creature, species, locale))
}

fn detail_from_parts(
    creature: CreatureResponse,
    species: SpeciesResponse,
    locale: &str,
) -> CreatureDetail {
    let description = species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == locale)
        .map(|entry| sanitize_text(&entry.flavor_text))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    CreatureDetail {
        id: creature.id,
        name: creature.name,
        sprite_url: sprite_url(creature.id),
        types: creature
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        height: creature.height,
        weight: creature.weight,
        description,
        moves: creature
            .moves
            .into_iter()
            .take(MOVE_LIMIT)
            .map(|slot| slot.move_info.name)
            .collect(),
        evolution_chain_url: species.evolution_chain.map(|chain| chain.url),
    }
}

fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

/// Evolution chain flattened to pre-order; empty on failure.
pub async fn fetch_evolutions(url: &str) -> Vec<EvolutionNode> {
    match load_evolutions(url).await {
        Ok(nodes) => nodes,
        Err(_) => Vec::new(),
    }
}

async fn load_evolutions(url: &str) -> Result<Vec<EvolutionNode>, ApiError> {
    let response: ChainResponse = fetch_json(url).await?;
    Ok(flatten_chain(&response.chain))
}

/// Pre-order walk over the chain document: each node first, then its
/// branches in document order, so siblings stay adjacent after their
/// shared ancestor. Nodes with an unparseable species locator are
/// skipped but their branches are still visited.
fn flatten_chain(root: &ChainLink) -> Vec<EvolutionNode> {
    let mut nodes = Vec::new();
    walk_chain(root, 0, &mut nodes);
    nodes
}

fn walk_chain(link: &ChainLink, depth: usize, nodes: &mut Vec<EvolutionNode>) {
    if depth >= MAX_CHAIN_DEPTH {
        return;
    }
    if let Some(id) = id_from_url(&link.species.url) {
        nodes.push(EvolutionNode {
            id,
            name: link.species.name.clone(),
            sprite_url: sprite_url(id),
        });
    }
    for next in &link.evolves_to {
        walk_chain(next, depth + 1, nodes);
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = http_client().get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, url: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn leaf(name: &str, id: u32) -> ChainLink {
        ChainLink {
            species: named(name, &format!("{API_BASE}/pokemon-species/{id}/")),
            evolves_to: Vec::new(),
        }
    }

    #[test]
    fn id_from_url_takes_last_segment() {
        assert_eq!(
            id_from_url("https://pokeapi.co/api/v2/pokemon-species/25/"),
            Some(25)
        );
        assert_eq!(
            id_from_url("https://pokeapi.co/api/v2/pokemon-species/133"),
            Some(133)
        );
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon-species/"), None);
        assert_eq!(id_from_url("not-a-number/"), None);
    }

    #[test]
    fn summary_carries_id_in_sprite_url() {
        let entry = CatalogEntry {
            pokemon_species: named("pikachu", "https://pokeapi.co/api/v2/pokemon-species/25/"),
        };
        let summary = summary_from_entry(entry).expect("summary");
        assert_eq!(summary.id, 25);
        assert!(summary.sprite_url.contains("/25.png"));
    }

    #[test]
    fn malformed_entry_is_dropped() {
        let entry = CatalogEntry {
            pokemon_species: named("glitch", "https://pokeapi.co/api/v2/pokemon-species/none/"),
        };
        assert!(summary_from_entry(entry).is_none());
    }

    #[test]
    fn catalog_id_matches_fixed_table() {
        assert_eq!(catalog_id("kanto"), Some(2));
        assert_eq!(catalog_id("Paldea"), Some(31));
        assert_eq!(catalog_id("orre"), None);
    }

    #[test]
    fn detail_picks_locale_description_and_truncates_moves() {
        let creature = CreatureResponse {
            id: 25,
            name: "pikachu".to_string(),
            height: 4,
            weight: 60,
            types: vec![TypeSlot {
                type_info: named("electric", ""),
            }],
            moves: ["mega-punch", "pay-day", "thunder-punch", "slam", "double-kick"]
                .iter()
                .map(|name| MoveSlot {
                    move_info: named(name, ""),
                })
                .collect(),
            species: ApiResource {
                url: "https://pokeapi.co/api/v2/pokemon-species/25/".to_string(),
            },
        };
        let species = SpeciesResponse {
            flavor_text_entries: vec![
                FlavorTextEntry {
                    flavor_text: "When several of\nthese POKeMON gather".to_string(),
                    language: named("en", ""),
                },
                FlavorTextEntry {
                    flavor_text: "Cuando varios de\u{000C}estos POKeMON se juntan".to_string(),
                    language: named("es", ""),
                },
            ],
            evolution_chain: Some(ApiResource {
                url: "https://pokeapi.co/api/v2/evolution-chain/10/".to_string(),
            }),
        };

        let detail = detail_from_parts(creature, species, "es");
        assert_eq!(detail.description, "Cuando varios de estos POKeMON se juntan");
        assert_eq!(detail.moves.len(), 4);
        assert_eq!(detail.moves[0], "mega-punch");
        assert_eq!(
            detail.evolution_chain_url.as_deref(),
            Some("https://pokeapi.co/api/v2/evolution-chain/10/")
        );
        assert!(detail.sprite_url.contains("/25.png"));
    }

    #[test]
    fn detail_falls_back_when_locale_missing() {
        let creature = CreatureResponse {
            id: 132,
            name: "ditto".to_string(),
            height: 3,
            weight: 40,
            types: Vec::new(),
            moves: Vec::new(),
            species: ApiResource {
                url: "https://pokeapi.co/api/v2/pokemon-species/132/".to_string(),
            },
        };
        let species = SpeciesResponse {
            flavor_text_entries: vec![FlavorTextEntry {
                flavor_text: "It can transform".to_string(),
                language: named("en", ""),
            }],
            evolution_chain: None,
        };

        let detail = detail_from_parts(creature, species, "es");
        assert_eq!(detail.description, FALLBACK_DESCRIPTION);
        assert!(detail.evolution_chain_url.is_none());
    }

    #[test]
    fn flatten_is_preorder_with_adjacent_siblings() {
        // A -> [B, C], B -> [D] flattens to [A, B, D, C].
        let root = ChainLink {
            species: named("a", &format!("{API_BASE}/pokemon-species/1/")),
            evolves_to: vec![
                ChainLink {
                    species: named("b", &format!("{API_BASE}/pokemon-species/2/")),
                    evolves_to: vec![leaf("d", 4)],
                },
                leaf("c", 3),
            ],
        };

        let names: Vec<_> = flatten_chain(&root)
            .into_iter()
            .map(|node| node.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn flatten_skips_unparseable_species_but_visits_children() {
        let root = ChainLink {
            species: named("broken", "no-id-here/"),
            evolves_to: vec![leaf("b", 2)],
        };

        let nodes = flatten_chain(&root);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "b");
        assert_eq!(nodes[0].id, 2);
    }

    #[test]
    fn flatten_stops_at_depth_cap() {
        let mut link = leaf("tip", 999);
        for depth in 0..(MAX_CHAIN_DEPTH * 2) {
            link = ChainLink {
                species: named("node", &format!("{API_BASE}/pokemon-species/{depth}/")),
                evolves_to: vec![link],
            };
        }

        let nodes = flatten_chain(&link);
        assert_eq!(nodes.len(), MAX_CHAIN_DEPTH);
    }
}
