use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Catalogue compiled into the binary.
const BUNDLED_DATASET: &str = include_str!("../assets/wardrobe.json");

/// Closed set of garment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Footwear,
    Outerwear,
    Accessory,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Footwear => "footwear",
            Self::Outerwear => "outerwear",
            Self::Accessory => "accessory",
        }
    }
}

/// A single clothing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub color: String,
    pub style: Vec<String>,
    pub image: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub occasion: Option<Vec<String>>,
    #[serde(default)]
    pub season: Option<Vec<String>>,
}

impl WardrobeItem {
    /// First style label, shown as the card's tag.
    pub fn headline_style(&self) -> Option<&str> {
        self.style.first().map(String::as_str)
    }
}

/// Index of an item inside [`Dataset::items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef(usize);

/// Index of an outfit inside [`Dataset::outfits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutfitRef(usize);

impl ItemRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl OutfitRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named position inside an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Top,
    Bottom,
    Footwear,
    Outerwear,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Self::Top, Self::Bottom, Self::Footwear, Self::Outerwear];

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Footwear => "footwear",
            Self::Outerwear => "outerwear",
        }
    }
}

/// Slot assignment of an outfit. Slots borrow items from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitSlots {
    pub top: Option<ItemRef>,
    pub bottom: Option<ItemRef>,
    pub footwear: Option<ItemRef>,
    pub outerwear: Option<ItemRef>,
}

impl OutfitSlots {
    pub fn get(&self, slot: Slot) -> Option<ItemRef> {
        match slot {
            Slot::Top => self.top,
            Slot::Bottom => self.bottom,
            Slot::Footwear => self.footwear,
            Slot::Outerwear => self.outerwear,
        }
    }

    fn set(&mut self, slot: Slot, item: ItemRef) {
        match slot {
            Slot::Top => self.top = Some(item),
            Slot::Bottom => self.bottom = Some(item),
            Slot::Footwear => self.footwear = Some(item),
            Slot::Outerwear => self.outerwear = Some(item),
        }
    }

    /// Filled slots in fixed slot order.
    pub fn filled(&self) -> impl Iterator<Item = (Slot, ItemRef)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }
}

#[derive(Debug, Clone)]
pub struct OutfitCard {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub slots: OutfitSlots,
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover_image: String,
    pub outfits: Vec<OutfitRef>,
}

/// Errors raised while loading a dataset file.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("Duplicate outfit id: {0}")]
    DuplicateOutfit(String),

    #[error("Duplicate collection id: {0}")]
    DuplicateCollection(String),

    #[error("Outfit {outfit} references unknown item {item} in its {slot} slot")]
    UnknownItem {
        outfit: String,
        slot: &'static str,
        item: String,
    },

    #[error("Collection {collection} references unknown outfit {outfit}")]
    UnknownOutfit { collection: String, outfit: String },
}

impl DatasetError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DatasetError::Io(e) => format!("Could not read the dataset file: {}", e),
            DatasetError::Json(e) => format!("The dataset file is not valid: {}", e),
            other => format!("Inconsistent dataset: {}", other),
        }
    }
}

// ── On-disk records ──

#[derive(Debug, Deserialize)]
struct RawDataset {
    items: Vec<WardrobeItem>,
    #[serde(default)]
    outfits: Vec<RawOutfit>,
    #[serde(default)]
    collections: Vec<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct RawOutfit {
    id: String,
    title: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    items: RawSlots,
}

#[derive(Debug, Default, Deserialize)]
struct RawSlots {
    top: Option<String>,
    bottom: Option<String>,
    footwear: Option<String>,
    outerwear: Option<String>,
}

impl RawSlots {
    fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Top => self.top.as_deref(),
            Slot::Bottom => self.bottom.as_deref(),
            Slot::Footwear => self.footwear.as_deref(),
            Slot::Outerwear => self.outerwear.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cover_image: String,
    #[serde(default)]
    outfits: Vec<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Immutable catalogue of items, outfits and collections.
#[derive(Debug, Clone)]
pub struct Dataset {
    items: Vec<WardrobeItem>,
    outfits: Vec<OutfitCard>,
    collections: Vec<Collection>,
}

impl Dataset {
    /// The catalogue shipped with the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            items = dataset.items.len(),
            outfits = dataset.outfits.len(),
            collections = dataset.collections.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(text)?;
        Self::resolve(raw)
    }

    /// Turn id references into typed indices, rejecting duplicates and dangling ids.
    fn resolve(raw: RawDataset) -> Result<Self, DatasetError> {
        let mut item_index: HashMap<&str, ItemRef> = HashMap::new();
        for (i, item) in raw.items.iter().enumerate() {
            if item_index.insert(item.id.as_str(), ItemRef(i)).is_some() {
                return Err(DatasetError::DuplicateItem(item.id.clone()));
            }
        }

        let mut outfits = Vec::with_capacity(raw.outfits.len());
        let mut outfit_index: HashMap<String, OutfitRef> = HashMap::new();
        for (i, raw_outfit) in raw.outfits.into_iter().enumerate() {
            if outfit_index
                .insert(raw_outfit.id.clone(), OutfitRef(i))
                .is_some()
            {
                return Err(DatasetError::DuplicateOutfit(raw_outfit.id));
            }

            let mut slots = OutfitSlots::default();
            for slot in Slot::ALL {
                if let Some(item_id) = raw_outfit.items.get(slot) {
                    let item = item_index.get(item_id).copied().ok_or_else(|| {
                        DatasetError::UnknownItem {
                            outfit: raw_outfit.id.clone(),
                            slot: slot.label(),
                            item: item_id.to_string(),
                        }
                    })?;
                    slots.set(slot, item);
                }
            }

            outfits.push(OutfitCard {
                id: raw_outfit.id,
                title: raw_outfit.title,
                tags: raw_outfit.tags,
                slots,
            });
        }

        let mut collections = Vec::with_capacity(raw.collections.len());
        let mut seen_collections = std::collections::HashSet::new();
        for raw_collection in raw.collections {
            if !seen_collections.insert(raw_collection.id.clone()) {
                return Err(DatasetError::DuplicateCollection(raw_collection.id));
            }
            let mut refs = Vec::with_capacity(raw_collection.outfits.len());
            for outfit_id in &raw_collection.outfits {
                let outfit = outfit_index.get(outfit_id).copied().ok_or_else(|| {
                    DatasetError::UnknownOutfit {
                        collection: raw_collection.id.clone(),
                        outfit: outfit_id.clone(),
                    }
                })?;
                refs.push(outfit);
            }
            collections.push(Collection {
                id: raw_collection.id,
                name: raw_collection.name,
                description: raw_collection.description,
                cover_image: raw_collection.cover_image,
                outfits: refs,
            });
        }

        Ok(Self {
            items: raw.items,
            outfits,
            collections,
        })
    }

    pub fn items(&self) -> &[WardrobeItem] {
        &self.items
    }

    pub fn outfits(&self) -> &[OutfitCard] {
        &self.outfits
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn item(&self, item: ItemRef) -> &WardrobeItem {
        &self.items[item.index()]
    }

    pub fn outfit(&self, outfit: OutfitRef) -> &OutfitCard {
        &self.outfits[outfit.index()]
    }

    pub fn item_refs(&self) -> impl Iterator<Item = ItemRef> + '_ {
        (0..self.items.len()).map(ItemRef)
    }

    pub fn outfit_refs(&self) -> impl Iterator<Item = OutfitRef> + '_ {
        (0..self.outfits.len()).map(OutfitRef)
    }

    #[cfg(test)]
    pub fn find_item(&self, id: &str) -> Option<ItemRef> {
        self.items.iter().position(|item| item.id == id).map(ItemRef)
    }

    /// Names of the items filling an outfit's slots.
    pub fn slot_names(&self, outfit: &OutfitCard) -> Vec<(Slot, &str)> {
        outfit
            .slots
            .filled()
            .map(|(slot, item)| (slot, self.item(item).name.as_str()))
            .collect()
    }
}
