use maud::{Markup, html};

use crate::{
    category::Category,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        form_errors,
    },
    item::ItemFormValues,
    validation::ValidationErrors,
};

/// The item form shared by the create and update pages.
///
/// Every category gets a checkbox. A box is checked when its ID is in
/// `values.category`.
pub fn item_form(
    action: &str,
    values: &ItemFormValues,
    available_categories: &[Category],
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
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Name of item"
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
                    placeholder="Description"
                    value=(values.description)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    label for="price" class=(FORM_LABEL_STYLE) { "Price" }

                    input
                        id="price"
                        type="number"
                        name="price"
                        step="0.01"
                        min="0"
                        max="999.99"
                        placeholder="0.00"
                        value=(values.price)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="1"
                        min="0"
                        max="10000"
                        placeholder="0"
                        value=(values.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Categories" }

                @if available_categories.is_empty() {
                    p class="text-sm" { "There are no categories yet." }
                }

                @for category in available_categories {
                    @let checkbox_id = format!("category-{}", category.id);

                    div class="flex items-center gap-3"
                    {
                        input
                            id=(checkbox_id)
                            type="checkbox"
                            name="category"
                            value=(category.id)
                            checked[values.has_category(category.id)]
                            class=(FORM_CHECKBOX_STYLE);

                        label for=(checkbox_id) class="text-sm" { (category.name) }
                    }
                }
            }

            (form_errors(errors.messages()))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
