//! Items in the catalog and their category memberships.

mod create;
mod db;
mod delete;
mod detail;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_item_endpoint, get_new_item_page};
pub use db::{
    count_items, create_item, create_item_tables, delete_item, get_all_items, get_item,
    update_item,
};
pub use delete::{delete_item_endpoint, get_delete_item_page};
pub use detail::get_item_page;
pub use domain::{
    CategoryRef, Item, ItemForm, ItemFormValues, ItemId, ItemListing, ItemSummary, NewItem,
    validate_item_form,
};
pub use edit::{get_update_item_page, update_item_endpoint};
pub use list::get_items_page;
