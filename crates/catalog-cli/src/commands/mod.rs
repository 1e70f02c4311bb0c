pub mod categories;
pub mod config;
pub mod tags;
pub mod variants;

use catalog_core::{Searchable, search, sort_by_name};

use crate::cli::ListArgs;

/// Applies `--search` and `--sort` to a fetched list.
pub(crate) fn filter_list<T: Searchable>(items: Vec<T>, args: &ListArgs) -> Vec<T> {
    let mut items = match &args.search {
        Some(query) => search(items, query),
        None => items,
    };
    if args.sort {
        sort_by_name(&mut items);
    }
    items
}
