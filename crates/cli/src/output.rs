//! Plain-text rendering of a [`RenderPlan`] for the `show` command.

use jitpages_engine::{KeyValueEntry, RenderPlan, TablePlan};
use jitpages_types::FieldProperty;
use jitpages_util::{display_width, single_line, truncate_to_width};

const MAX_CELL_WIDTH: usize = 48;

/// Text for `plan`, newline terminated unless the plan draws nothing.
pub fn format_plan(plan: &RenderPlan) -> String {
    match plan {
        RenderPlan::Nothing => String::new(),
        RenderPlan::Table(table) => format_table(table),
        RenderPlan::KeyValue(entries) => format_key_values(entries),
        RenderPlan::Scalar(text) => format!("{text}\n"),
    }
}

/// One derived field per line.
pub fn format_fields(fields: &[FieldProperty]) -> String {
    fields.iter().map(|field| format!("{}\n", field.key)).collect()
}

fn format_table(table: &TablePlan) -> String {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate_to_width(&single_line(cell), MAX_CELL_WIDTH)).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .chain(std::iter::once(display_width(column)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if !table.columns.is_empty() {
        out.push_str(&format_row(&table.columns, &widths));
        for row in &rows {
            out.push_str(&format_row(row, &widths));
        }
    }
    out.push_str(&format!("{} ({} rows)\n", table.pagination.label(), table.pagination.total_rows()));
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell}{}", " ".repeat(width.saturating_sub(display_width(cell)))))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

fn format_key_values(entries: &[KeyValueEntry]) -> String {
    let key_width = entries.iter().map(|entry| display_width(&entry.key)).max().unwrap_or(0);
    entries
        .iter()
        .map(|entry| {
            let padding = " ".repeat(key_width - display_width(&entry.key));
            format!("{}{padding}  {}\n", entry.key, single_line(&entry.value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitpages_engine::plan_page;
    use jitpages_types::{Page, PageData, PageSize};
    use serde_json::json;

    fn plan_for(data: serde_json::Value, fields: Vec<FieldProperty>, page_size: PageSize, page_index: usize) -> RenderPlan {
        let page = Page {
            id: 1,
            name: "P".into(),
            data: PageData::from(data),
            fields,
            ..Page::default()
        };
        plan_page(&page, page_size, page_index)
    }

    #[test]
    fn tables_align_columns_and_report_pagination() {
        let plan = plan_for(
            json!([{"id": 1, "name": "alpha"}, {"id": 22, "name": "b"}]),
            vec![],
            PageSize::default(),
            0,
        );
        assert_eq!(format_plan(&plan), "id  name\n1   alpha\n22  b\nPage 1 of 1 (2 rows)\n");
    }

    #[test]
    fn hidden_columns_are_left_out() {
        let plan = plan_for(
            json!([{"id": 1, "name": "r1"}, {"id": 2, "name": "r2"}]),
            vec![FieldProperty::visible("id"), FieldProperty::hidden("name")],
            PageSize::default(),
            0,
        );
        assert_eq!(format_plan(&plan), "id\n1\n2\nPage 1 of 1 (2 rows)\n");
    }

    #[test]
    fn later_pages_show_their_window() {
        let rows: Vec<_> = (1..=7).map(|id| json!({ "id": id })).collect();
        let plan = plan_for(serde_json::Value::Array(rows), vec![], PageSize::Rows(5), 1);
        assert_eq!(format_plan(&plan), "id\n6\n7\nPage 2 of 2 (7 rows)\n");
    }

    #[test]
    fn objects_print_as_aligned_pairs() {
        let plan = plan_for(json!({"name": "repo", "stargazers": 3, "owner": {"login": "x"}}), vec![], PageSize::default(), 0);
        assert_eq!(
            format_plan(&plan),
            "name        repo\nstargazers  3\nowner       {\"login\":\"x\"}\n"
        );
    }

    #[test]
    fn scalars_and_empty_data() {
        assert_eq!(format_plan(&plan_for(json!("invalid url"), vec![], PageSize::default(), 0)), "\"invalid url\"\n");
        assert_eq!(format_plan(&RenderPlan::Nothing), "");
        assert_eq!(format_plan(&plan_for(json!([]), vec![], PageSize::default(), 0)), "Page 1 of 1 (0 rows)\n");
    }

    #[test]
    fn fields_print_one_per_line() {
        let fields = vec![FieldProperty::visible("id"), FieldProperty::hidden("name")];
        assert_eq!(format_fields(&fields), "id\nname\n");
    }
}
