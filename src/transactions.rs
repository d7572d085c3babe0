use ndarray::ArrayView2;
use std::collections::HashMap;
use tracing::debug;

/// Interned item identifier. Ids are handed out in first-discovery order.
pub type ItemId = usize;

/// Sorted, deduplicated item ids.
pub type Itemset = Vec<ItemId>;

/// Label interning in first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct ItemDictionary {
    labels: Vec<String>,
    ids: HashMap<String, ItemId>,
}

impl ItemDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, label: &str) -> ItemId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_owned());
        self.ids.insert(label.to_owned(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<ItemId> {
        self.ids.get(label).copied()
    }

    pub fn label(&self, id: ItemId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Maps ids back to labels, preserving the order of `items`.
    pub fn labels_of(&self, items: &[ItemId]) -> Vec<String> {
        items
            .iter()
            .filter_map(|&id| self.label(id).map(str::to_owned))
            .collect()
    }

    /// Interns a raw transaction into a sorted, deduplicated itemset.
    pub fn encode<I, S>(&mut self, transaction: I) -> Itemset
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Itemset = transaction
            .into_iter()
            .map(|label| self.intern(label.as_ref()))
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }

    /// Like [`encode`](Self::encode) but never interns: unknown labels are dropped.
    pub fn encode_known<I, S>(&self, transaction: I) -> Itemset
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Itemset = transaction
            .into_iter()
            .filter_map(|label| self.get(label.as_ref()))
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }
}

/// Immutable, normalized transaction collection.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    dictionary: ItemDictionary,
    transactions: Vec<Itemset>,
}

impl TransactionStore {
    pub fn from_transactions<T, I, S>(transactions: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = ItemDictionary::new();
        let mut encoded = Vec::new();

        for transaction in transactions {
            let items = dictionary.encode(transaction);
            if items.is_empty() {
                debug!(index = encoded.len(), "empty transaction");
            }
            encoded.push(items);
        }

        Self {
            dictionary,
            transactions: encoded,
        }
    }

    /// Builds a store from a binary transaction matrix: a non-zero cell
    /// `(row, col)` puts item `col` into transaction `row`. Labels are the
    /// decimal column indices.
    pub fn from_one_hot(matrix: ArrayView2<i32>) -> Self {
        Self::from_transactions(matrix_to_transactions(matrix))
    }

    pub fn dictionary(&self) -> &ItemDictionary {
        &self.dictionary
    }

    pub fn transactions(&self) -> &[Itemset] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.dictionary.len()
    }

    pub fn label(&self, id: ItemId) -> Option<&str> {
        self.dictionary.label(id)
    }

    /// Encodes a label set against this store's dictionary; `None` if any
    /// label never occurs in the store.
    pub fn itemset_of<S: AsRef<str>>(&self, labels: &[S]) -> Option<Itemset> {
        let mut items = labels
            .iter()
            .map(|label| self.dictionary.get(label.as_ref()))
            .collect::<Option<Itemset>>()?;
        items.sort_unstable();
        items.dedup();
        Some(items)
    }
}

/// Convert binary transaction matrix to label lists
pub(crate) fn matrix_to_transactions(matrix: ArrayView2<i32>) -> Vec<Vec<String>> {
    matrix
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != 0)
                .map(|(col, _)| col.to_string())
                .collect()
        })
        .collect()
}

/// Sorted-merge subset test; both slices must be sorted ascending.
pub fn is_subset(needle: &[ItemId], haystack: &[ItemId]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut hay = haystack.iter();
    'outer: for &item in needle {
        for &candidate in hay.by_ref() {
            if candidate == item {
                continue 'outer;
            }
            if candidate > item {
                return false;
            }
        }
        return false;
    }
    true
}
