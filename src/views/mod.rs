// HTML page and fragment rendering
//
// Templates are compiled-in raw strings registered with tera by name. All
// user-supplied values go through tera's auto-escaping; only the
// markdown-rendered research body is inserted raw.

use crate::models::Study;
use serde::Serialize;
use tera::{Context, Tera};

// Template names end in .html so tera applies HTML auto-escaping
pub const INDEX: &str = "index.html";
pub const STUDY_TABLE: &str = "study_table.html";
pub const RESEARCH_RESULT: &str = "research_result.html";
pub const ALERT: &str = "alert.html";

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Vertical Reading Tool</title>
  <link rel="stylesheet" href="/static/styles.css">
</head>
<body>
  <div class="container">
    <div id="main-content">
      <div class="card">
        <h2 class="card-title">Vertical Reading Tool</h2>
        <form id="study-form" action="/create-study" method="post">
          <label for="syndrome">Syndrome</label>
          <input type="text" id="syndrome" name="syndrome" placeholder="e.g., Pharyngitis">
          <h4 class="conditions-heading">Conditions that cause this syndrome:</h4>
          <label for="condition1">Condition 1</label>
          <input type="text" id="condition1" name="condition1" placeholder="e.g., Group A beta hemolytic strep">
          <label for="condition2">Condition 2</label>
          <input type="text" id="condition2" name="condition2" placeholder="e.g., Infectious mononucleosis">
          <label for="condition3">Condition 3</label>
          <input type="text" id="condition3" name="condition3" placeholder="e.g., Acute retroviral syndrome">
          <div class="form-actions">
            <button type="submit" class="btn btn-primary">Start Study</button>
          </div>
        </form>
      </div>
    </div>
  </div>
  <script src="/static/study.js"></script>
</body>
</html>
"#;

const STUDY_TABLE_TEMPLATE: &str = r#"<div id="study-root" data-syndrome="{{ syndrome }}" data-conditions="{{ conditions_json }}">
  <h2 class="study-title">Studying: {{ syndrome }}</h2>
  <table class="study-table">
    <thead>
      <tr>
        <th>Aspect</th>
        {%- for condition in conditions %}
        <th>{{ condition }}</th>
        {%- endfor %}
      </tr>
    </thead>
    <tbody>
      {%- for row in rows %}
      <tr>
        <th class="aspect-cell">
          <span>{{ row.aspect }}</span>
          <button type="button" class="btn btn-secondary btn-small research-btn" data-aspect="{{ row.aspect }}">Research</button>
        </th>
        {%- for cell in row.cells %}
        <td><textarea rows="2" id="cond{{ loop.index0 }}_{{ row.aspect }}" data-condition="{{ loop.index0 }}" data-aspect="{{ row.aspect }}" placeholder="Enter your text here...">{{ cell }}</textarea></td>
        {%- endfor %}
      </tr>
      {%- endfor %}
    </tbody>
  </table>
  <div id="ai-feed-area" class="feed-area hidden"></div>
  <div class="table-actions">
    <button type="button" id="compare-btn" class="btn btn-primary">Compare with AI</button>
    <button type="button" id="save-btn" class="btn btn-secondary">Save</button>
    <button type="button" id="export-btn" class="btn btn-secondary">Export CSV</button>
  </div>
</div>
"#;

const RESEARCH_RESULT_TEMPLATE: &str = r#"<div class="research-result">
  <h3>{{ title }}</h3>
  <div class="research-body">{{ body | safe }}</div>
</div>
"#;

const ALERT_TEMPLATE: &str = r#"<div class="alert alert-error">{{ message }}</div>
"#;

/// One table row for the study table template
#[derive(Serialize)]
struct RowContext<'a> {
    aspect: &'a str,
    cells: Vec<&'a str>,
}

/// Renders the page and the fragments the handlers return
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (INDEX, INDEX_TEMPLATE),
            (STUDY_TABLE, STUDY_TABLE_TEMPLATE),
            (RESEARCH_RESULT, RESEARCH_RESULT_TEMPLATE),
            (ALERT, ALERT_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// The landing page with the study creation form
    pub fn index_page(&self) -> String {
        self.render(INDEX, &Context::new())
    }

    /// The editable study table fragment for a freshly created study
    pub fn study_table(&self, study: &Study) -> String {
        let mut context = Context::new();
        context.insert("syndrome", study.syndrome());
        context.insert("conditions", study.conditions());

        // The root element carries the study identity for the client-state
        // module; serialization of a Vec<String> cannot fail
        let conditions_json =
            serde_json::to_string(study.conditions()).unwrap_or_else(|_| "[]".to_string());
        context.insert("conditions_json", &conditions_json);

        let rows: Vec<RowContext> = study
            .aspects()
            .iter()
            .map(|aspect| RowContext {
                aspect: aspect.as_str(),
                cells: (0..study.conditions().len())
                    .map(|i| study.cell(i, *aspect))
                    .collect(),
            })
            .collect();
        context.insert("rows", &rows);

        self.render(STUDY_TABLE, &context)
    }

    /// A successful research result; `body_html` is already-rendered markdown
    pub fn research_result(&self, title: &str, body_html: &str) -> String {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("body", body_html);
        self.render(RESEARCH_RESULT, &context)
    }

    /// A visibly flagged inline message (validation failures, gateway errors)
    pub fn alert(&self, message: &str) -> String {
        let mut context = Context::new();
        context.insert("message", message);
        self.render(ALERT, &context)
    }

    fn render(&self, name: &str, context: &Context) -> String {
        match self.tera.render(name, context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render template '{}': {}", name, e);
                "<div class=\"alert alert-error\">Internal rendering error</div>".to_string()
            }
        }
    }
}
