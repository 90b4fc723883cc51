use std::collections::HashSet;

use super::domain::{Category, Item, ItemId, ScoreBounds};

static STANDARD_ITEMS: [Item; 30] = [
    // Self
    Item::new(
        1,
        "When I get angry, I think about why I became angry.",
        Category::Oneself,
    ),
    Item::new(
        2,
        "I often think about what I could be good at.",
        Category::Oneself,
    ),
    Item::new(
        3,
        "Even when something is hard, I try to get through it on my own.",
        Category::Oneself,
    ),
    Item::new(
        4,
        "When I am in a good mood, I know the reason why.",
        Category::Oneself,
    ),
    Item::new(
        5,
        "When I make a mistake, I comfort myself: \"It's okay, I can try again.\"",
        Category::Oneself,
    ),
    Item::new(
        6,
        "I look back on whether what I did was right.",
        Category::Oneself,
    ),
    Item::reversed(
        7,
        "It is hard for me to put my feelings into words.",
        Category::Oneself,
    ),
    Item::new(
        8,
        "I tend to respect my own thoughts and feelings.",
        Category::Oneself,
    ),
    // Others
    Item::new(
        9,
        "When a friend looks upset, I want to know why.",
        Category::Others,
    ),
    Item::new(
        10,
        "When a friend is sad, I feel sad too.",
        Category::Others,
    ),
    Item::new(
        11,
        "Even when a friend makes a mistake, I try to understand.",
        Category::Others,
    ),
    Item::new(
        12,
        "When a friend is praised, I feel happy too.",
        Category::Others,
    ),
    Item::reversed(
        13,
        "When a friend is angry, it is hard for me to speak to them first.",
        Category::Others,
    ),
    Item::new(
        14,
        "When a friend is sick, I want to help.",
        Category::Others,
    ),
    Item::new(
        15,
        "When a friend tells me something upsetting, I listen until the end.",
        Category::Others,
    ),
    Item::new(
        16,
        "When a friend is in trouble, I think of ways to help.",
        Category::Others,
    ),
    // Object
    Item::new(
        17,
        "When a plant wilts, I think \"I should water it.\"",
        Category::Object,
    ),
    Item::new(
        18,
        "When an animal is hurt, my heart aches.",
        Category::Object,
    ),
    Item::new(
        19,
        "When something I treasure breaks, I feel upset.",
        Category::Object,
    ),
    Item::new(
        20,
        "When I look at something I made, I feel proud.",
        Category::Object,
    ),
    Item::new(
        21,
        "When I see something thrown away, I feel sorry for it.",
        Category::Object,
    ),
    Item::new(
        22,
        "I handle my friends' treasured things carefully.",
        Category::Object,
    ),
    Item::new(
        23,
        "When I see litter, I pick it up instead of walking past.",
        Category::Object,
    ),
    Item::new(
        24,
        "I feel that even things I use every day might have feelings.",
        Category::Object,
    ),
    // Situation
    Item::new(
        25,
        "When a friend is being scolded, I feel nervous or worried too.",
        Category::Situation,
    ),
    Item::new(
        26,
        "When people argue, I think about how they could make up.",
        Category::Situation,
    ),
    Item::new(
        27,
        "In a presentation or competition, I understand how nervous others feel.",
        Category::Situation,
    ),
    Item::new(
        28,
        "When everyone is having a hard time, I quietly try to help.",
        Category::Situation,
    ),
    Item::new(
        29,
        "When someone is being teased, I want to tell others to stop.",
        Category::Situation,
    ),
    Item::new(
        30,
        "When a situation is my fault, I think I should apologize first.",
        Category::Situation,
    ),
];

/// Error raised when reading from or building a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("item index {index} is outside the catalogue of {count} items")]
    OutOfRange { index: usize, count: usize },
    #[error("item id {0} appears more than once in the catalogue")]
    DuplicateItem(ItemId),
    #[error("catalogue contains no items")]
    Empty,
}

/// Read-only, ordered catalogue of questionnaire items.
///
/// The table is `'static` and never mutated; copies of the bank share it.
#[derive(Debug, Clone, Copy)]
pub struct QuestionBank {
    items: &'static [Item],
}

impl QuestionBank {
    /// The reference 30-item instrument (self 8, others 8, object 8, situation 6).
    pub fn standard() -> Self {
        Self {
            items: &STANDARD_ITEMS,
        }
    }

    /// Build a bank over another static table, rejecting duplicate ids.
    pub fn from_static(items: &'static [Item]) -> Result<Self, BankError> {
        if items.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if !seen.insert(item.id) {
                return Err(BankError::DuplicateItem(item.id));
            }
        }

        Ok(Self { items })
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_at(&self, index: usize) -> Result<&'static Item, BankError> {
        self.items.get(index).ok_or(BankError::OutOfRange {
            index,
            count: self.items.len(),
        })
    }

    /// Every item in catalogue order. Each call starts a fresh traversal.
    pub fn all_items(&self) -> std::slice::Iter<'static, Item> {
        self.items.iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&'static Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &'static Item> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    pub fn category_size(&self, category: Category) -> usize {
        self.items_in(category).count()
    }

    pub fn category_bounds(&self, category: Category) -> ScoreBounds {
        let count = u16::try_from(self.category_size(category)).unwrap_or(u16::MAX);
        ScoreBounds::for_items(count)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}
