//! Categories for grouping the items in the catalog.

mod create;
mod db;
mod delete;
mod detail;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    count_categories, create_category, create_category_table, delete_category,
    get_all_categories, get_category, get_category_by_name, get_items_in_category,
    update_category,
};
pub use delete::{delete_category_endpoint, get_delete_category_page};
pub use detail::get_category_page;
pub use domain::{Category, CategoryForm, CategoryId, NewCategory, validate_category_form};
pub use edit::{get_update_category_page, update_category_endpoint};
pub use list::get_categories_page;
