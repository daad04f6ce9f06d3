use maud::{Markup, html};

use crate::{
    category::NewCategory,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, form_errors},
    validation::ValidationErrors,
};

/// The fields shared by the create and update category forms.
///
/// `values` pre-fills the inputs, e.g. with a rejected submission or the
/// category being updated.
pub fn category_form(
    action: &str,
    values: &NewCategory,
    errors: &ValidationErrors,
    submit_label: &str,
) -> Markup {
    html! {
        form
            method="post"
            action=(action)
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Chocolate"
                    value=(values.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="Delicious chocolate candies"
                    value=(values.description)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_errors(errors.messages()))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
