#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use db::{must_open_shared_test_db, must_open_test_db};
pub(crate) use form::{
    assert_form_action, assert_form_error_messages, assert_form_input_with_value,
    assert_form_submit_button_with_text, category_checkboxes, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, select_hrefs, select_text};
pub(crate) use http::{assert_content_type, assert_redirect};
