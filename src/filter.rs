use crate::data::{Dataset, OutfitCard, OutfitRef, WardrobeItem};
use regex::Regex;
use std::fmt;

/// Label of the sentinel option that disables a dimension.
pub const ALL_LABEL: &str = "All";

/// One dimension of the items filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Type,
    Style,
    Mood,
    Color,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [Self::Type, Self::Style, Self::Mood, Self::Color];

    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Style => "Style",
            Self::Mood => "Mood",
            Self::Color => "Color",
        }
    }

    /// Values offered by the dropdown, "All" first.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Type => &["All", "top", "bottom", "outerwear", "footwear", "accessory"],
            Self::Style => &[
                "All",
                "Crop",
                "Striped",
                "Denim",
                "Wide Leg",
                "Golden",
                "Elegant",
                "Classic",
                "Casual",
                "Professional",
                "A-Line",
            ],
            Self::Mood => &[
                "All", "Casual", "Date", "Work", "Formal", "Weekend", "Party", "Beach",
            ],
            Self::Color => &[
                "All", "Black", "Blue", "Brown", "Golden", "Green", "Gray", "Cream", "White",
                "Navy",
            ],
        }
    }
}

/// Value of a single filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    /// Parse a dropdown label; "All" maps to the sentinel.
    pub fn parse(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(v) => v,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<String>> for FilterValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |v| Self::parse(&v))
    }
}

/// Selection tuple applied to wardrobe items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemFilter {
    pub kind: FilterValue,
    pub style: FilterValue,
    pub mood: FilterValue,
    pub color: FilterValue,
}

impl ItemFilter {
    pub fn get(&self, dimension: FilterDimension) -> &FilterValue {
        match dimension {
            FilterDimension::Type => &self.kind,
            FilterDimension::Style => &self.style,
            FilterDimension::Mood => &self.mood,
            FilterDimension::Color => &self.color,
        }
    }

    /// Replace one dimension; the others keep their values.
    pub fn set(&mut self, dimension: FilterDimension, value: FilterValue) {
        match dimension {
            FilterDimension::Type => self.kind = value,
            FilterDimension::Style => self.style = value,
            FilterDimension::Mood => self.mood = value,
            FilterDimension::Color => self.color = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Dimensions currently constraining the result, in dimension order.
    pub fn active(&self) -> Vec<(FilterDimension, &str)> {
        FilterDimension::ALL
            .into_iter()
            .filter_map(|dim| match self.get(dim) {
                FilterValue::All => None,
                FilterValue::Only(v) => Some((dim, v.as_str())),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .into_iter()
            .all(|dim| self.get(dim).is_all())
    }

    /// Whether `item` passes every active constraint.
    pub fn matches(&self, item: &WardrobeItem) -> bool {
        if let FilterValue::Only(kind) = &self.kind {
            if item.category.as_str() != kind.to_lowercase() {
                return false;
            }
        }
        if let FilterValue::Only(style) = &self.style {
            if !item.style.iter().any(|s| s == style) {
                return false;
            }
        }
        if let FilterValue::Only(mood) = &self.mood {
            let mood = mood.to_lowercase();
            let hit = item
                .occasion
                .as_ref()
                .is_some_and(|occasions| occasions.iter().any(|o| o.to_lowercase() == mood));
            if !hit {
                return false;
            }
        }
        if let FilterValue::Only(color) = &self.color {
            if item.color != *color {
                return false;
            }
        }
        true
    }

    /// Stable filter: survivors keep their input order.
    pub fn apply<'a, I>(&self, items: I) -> Vec<&'a WardrobeItem>
    where
        I: IntoIterator<Item = &'a WardrobeItem>,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Collection chip on the Collections tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chip {
    #[default]
    Work,
    Leisure,
    Date,
    Party,
}

impl Chip {
    pub const ALL: [Chip; 4] = [Self::Work, Self::Leisure, Self::Date, Self::Party];

    pub fn id(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Leisure => "leisure",
            Self::Date => "date",
            Self::Party => "party",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Leisure => "Leisure",
            Self::Date => "Date",
            Self::Party => "Party",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Work => "🏢",
            Self::Leisure => "🏖️",
            Self::Date => "💕",
            Self::Party => "🎉",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Work => &["work", "professional", "business"],
            Self::Leisure => &["casual", "relaxed", "weekend"],
            Self::Date => &["elegant", "evening", "romantic"],
            Self::Party => &["party", "celebration", "night"],
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|chip| chip.id() == id)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Work => Self::Leisure,
            Self::Leisure => Self::Date,
            Self::Date => Self::Party,
            Self::Party => Self::Work,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Work => Self::Party,
            Self::Leisure => Self::Work,
            Self::Date => Self::Leisure,
            Self::Party => Self::Date,
        }
    }
}

/// How chip keywords are matched against outfit tags.
#[derive(Debug, Clone, Default)]
pub enum ChipMatcher {
    /// Lower-cased substring test. "Anti-work" matches `work`.
    #[default]
    Substring,
    /// Keyword must be a whole word of the tag.
    WordBoundary(Vec<(Chip, Regex)>),
}

impl ChipMatcher {
    pub fn new(strict: bool) -> Result<Self, regex::Error> {
        if !strict {
            return Ok(Self::Substring);
        }
        let mut patterns = Vec::with_capacity(Chip::ALL.len());
        for chip in Chip::ALL {
            let alternation = chip
                .keywords()
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            // hyphenated compounds count as one word
            let re = Regex::new(&format!(r"(?i)(^|[^\w-])({alternation})($|[^\w-])"))?;
            patterns.push((chip, re));
        }
        Ok(Self::WordBoundary(patterns))
    }

    pub fn matches(&self, chip: Chip, tags: &[String]) -> bool {
        match self {
            Self::Substring => tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                chip.keywords().iter().any(|k| tag.contains(k))
            }),
            Self::WordBoundary(patterns) => patterns
                .iter()
                .filter(|(c, _)| *c == chip)
                .any(|(_, re)| tags.iter().any(|tag| re.is_match(tag))),
        }
    }

    /// Outfits classified under `chip`, in dataset order.
    pub fn outfits_for<'a>(&self, chip: Chip, dataset: &'a Dataset) -> Vec<(OutfitRef, &'a OutfitCard)> {
        dataset
            .outfit_refs()
            .map(|r| (r, dataset.outfit(r)))
            .filter(|(_, outfit)| self.matches(chip, &outfit.tags))
            .collect()
    }
}
