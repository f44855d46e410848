//! Server-side rendering of a form into a storefront HTML fragment.
//!
//! The fragment is a plain `<form>` that works without JavaScript (it posts
//! url-encoded fields named by question id to the form's submit route). The
//! embed script upgrades it to a JSON submission using the `data-formify-*`
//! attributes.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::CoreError;
use crate::form::{Form, Question, QuestionType};
use crate::settings::ResolvedSettings;

/// Path of the JSON submission endpoint, relative to the app URL.
pub const PUBLIC_SUBMIT_PATH: &str = "/api/public/submit";

const FORM_TEMPLATE: &str = "form";

/// Where the rendered markup should point its requests.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Public base URL of this server, e.g. `https://forms.example.com`.
    pub app_url: String,
}

impl RenderContext {
    pub fn new(app_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}{PUBLIC_SUBMIT_PATH}", self.app_url)
    }

    /// Url-encoded fallback target for one form.
    pub fn form_action(&self, form: &Form) -> String {
        format!("{}/api/public/form/{}/submit", self.app_url, form.id)
    }
}

#[derive(Debug, Serialize)]
struct FormView {
    id: String,
    title: String,
    description: String,
    action: String,
    submit_url: String,
    success_message: String,
    container_style: String,
    button_style: String,
    button_text: String,
    fields: Vec<FieldView>,
}

/// One rendered question. Exactly one of the `is_*` flags is set.
#[derive(Debug, Serialize)]
struct FieldView {
    id: String,
    label: String,
    placeholder: String,
    required: bool,
    input_type: &'static str,
    is_input: bool,
    is_textarea: bool,
    is_select: bool,
    is_radio: bool,
    is_checkbox: bool,
    options: Vec<String>,
}

impl FieldView {
    fn from_question(question: &Question) -> Self {
        let kind = question.question_type;
        let input_type = match kind {
            QuestionType::Email => "email",
            QuestionType::Number => "number",
            _ => "text",
        };
        Self {
            id: question.id.clone(),
            label: question.label().to_string(),
            placeholder: question.placeholder.clone().unwrap_or_default(),
            required: question.required,
            input_type,
            is_input: matches!(
                kind,
                QuestionType::Short | QuestionType::Email | QuestionType::Number
            ),
            is_textarea: kind == QuestionType::Paragraph,
            is_select: kind == QuestionType::Select,
            is_radio: kind == QuestionType::Multiple,
            is_checkbox: kind == QuestionType::Checkboxes,
            options: question.options.clone(),
        }
    }
}

/// Renders forms with a fixed set of compiled templates.
pub struct FormRenderer {
    handlebars: Handlebars<'static>,
}

impl FormRenderer {
    pub fn new() -> Result<Self, CoreError> {
        let mut hb = Handlebars::new();
        hb.register_template_string(FORM_TEMPLATE, FORM_HTML)
            .map_err(|e| CoreError::Internal(format!("form template: {e}")))?;
        Ok(Self { handlebars: hb })
    }

    /// Render the visible questions of `form`, in schema order.
    pub fn render(&self, form: &Form, ctx: &RenderContext) -> Result<String, CoreError> {
        let settings = ResolvedSettings::from_value(&form.settings);
        let view = FormView {
            id: form.id.to_string(),
            title: form.title.clone(),
            description: settings.description.clone(),
            action: ctx.form_action(form),
            submit_url: ctx.submit_url(),
            success_message: settings.success_message.clone(),
            container_style: settings.container_style(),
            button_style: settings.button_style(),
            button_text: settings.button_text.clone(),
            fields: form.visible_questions().map(FieldView::from_question).collect(),
        };

        self.handlebars
            .render(FORM_TEMPLATE, &view)
            .map_err(|e| CoreError::Internal(format!("render form {}: {e}", form.id)))
    }
}

const FORM_HTML: &str = r#"<form class="formify-form" id="formify-{{id}}" method="post" action="{{action}}" data-formify-form="{{id}}" data-formify-submit="{{submit_url}}" data-formify-success="{{success_message}}" style="{{container_style}}">
  <h2 class="formify-title">{{title}}</h2>
{{#if description}}
  <p class="formify-description">{{description}}</p>
{{/if}}
{{#each fields}}
  <div class="formify-field" data-question-id="{{id}}" data-required="{{required}}" style="margin-bottom:16px;">
    <label for="formify-{{../id}}-{{id}}" style="display:block;margin-bottom:6px;font-weight:600;">{{label}}{{#if required}} <span class="formify-required">*</span>{{/if}}</label>
{{#if is_input}}
    <input type="{{input_type}}" id="formify-{{../id}}-{{id}}" name="{{id}}" placeholder="{{placeholder}}" style="width:100%;padding:8px;"{{#if required}} required{{/if}}>
{{/if}}
{{#if is_textarea}}
    <textarea id="formify-{{../id}}-{{id}}" name="{{id}}" placeholder="{{placeholder}}" rows="4" style="width:100%;padding:8px;"{{#if required}} required{{/if}}></textarea>
{{/if}}
{{#if is_select}}
    <select id="formify-{{../id}}-{{id}}" name="{{id}}" style="width:100%;padding:8px;"{{#if required}} required{{/if}}>
      <option value="">Select an option</option>
{{#each options}}
      <option value="{{this}}">{{this}}</option>
{{/each}}
    </select>
{{/if}}
{{#if is_radio}}
{{#each options}}
    <label style="display:block;"><input type="radio" name="{{../id}}" value="{{this}}"> {{this}}</label>
{{/each}}
{{/if}}
{{#if is_checkbox}}
{{#each options}}
    <label style="display:block;"><input type="checkbox" name="{{../id}}" value="{{this}}"> {{this}}</label>
{{/each}}
{{/if}}
  </div>
{{/each}}
  <button type="submit" class="formify-submit" style="{{button_style}}">{{button_text}}</button>
</form>
"#;
