use std::io::IsTerminal;

use polars::prelude::*;

pub struct MarkdownPrinter {
    content: String,
}

impl MarkdownPrinter {
    pub fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    fn is_tty(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    pub fn dump(&self) {
        if self.is_tty() {
            let mut skin = termimad::MadSkin::default();
            for i in 0..8 {
                skin.headers[i].align = termimad::Alignment::Left;
                skin.headers[i].add_attr(termimad::crossterm::style::Attribute::Bold);
                skin.headers[i].set_fg(termimad::crossterm::style::Color::Blue);
            }
            skin.headers[0].set_bg(termimad::crossterm::style::Color::Blue);
            skin.headers[0].add_attr(termimad::crossterm::style::Attribute::NoUnderline);
            skin.print_text(self.content());
        } else {
            println!("{}", self.content());
        }
    }

    pub fn add(&mut self, s: impl AsRef<str>) {
        self.content.push_str(s.as_ref());
    }

    pub fn add_dataframe(&mut self, df: &DataFrame) -> anyhow::Result<()> {
        let md_table = self.df_to_markdown(df)?;
        self.content.push_str(&md_table);
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn fmt_float(v: f64) -> String {
        if v != 0.0 && v.abs() < 1e-2 {
            format!("{:.3e}", v)
        } else {
            format!("{:.3}", v)
        }
    }

    fn fmt_value(&self, v: &AnyValue) -> (String, bool) {
        match v {
            AnyValue::Null => ("-".to_owned(), true),
            AnyValue::Float32(v) => (Self::fmt_float(*v as f64), true),
            AnyValue::Float64(v) => (Self::fmt_float(*v), true),
            AnyValue::UInt32(v) => (format!("{}", v), true),
            AnyValue::UInt64(v) => (format!("{}", v), true),
            AnyValue::Int32(v) => (format!("{}", v), true),
            AnyValue::Int64(v) => (format!("{}", v), true),
            _ => {
                if let Some(v) = v.get_str() {
                    (v.to_string(), false)
                } else {
                    (format!("{:?}", v), true)
                }
            }
        }
    }

    fn df_to_markdown(&self, df: &DataFrame) -> anyhow::Result<String> {
        // Collect cell strings by columns
        let mut cols = vec![];
        let mut col_align_r = vec![];
        for col in df.get_columns() {
            let mut c = vec![col.name().to_owned()];
            let mut align_right = true;
            for i in 0..col.len() {
                let (v, r) = self.fmt_value(&col.get(i)?);
                c.push(v);
                if i == 0 {
                    align_right = r;
                }
            }
            col_align_r.push(align_right);
            cols.push(c);
        }
        if cols.is_empty() {
            return Ok(String::new());
        }
        // Get each column's max width
        let col_widths = cols
            .iter()
            .map(|c| c.iter().map(|s| s.len()).max().unwrap_or_default())
            .collect::<Vec<_>>();
        // Pad every cell to its column width
        for (j, col) in cols.iter_mut().enumerate() {
            for cell in col.iter_mut() {
                let pad = col_widths[j] - cell.len();
                cell.push_str(&" ".repeat(pad));
            }
        }
        // Construct markdown table string, row by row
        let build_row = |values: &[&str]| "| ".to_string() + values.join(" | ").as_str() + " |\n";
        let align_row = || {
            let mut s = "|".to_string();
            for (i, w) in col_widths.iter().enumerate() {
                s += if col_align_r[i] { " " } else { ":" };
                s += &"-".repeat(*w);
                s += if col_align_r[i] { ":" } else { " " };
                s += "|";
            }
            s + "\n"
        };
        let rows = cols[0].len();
        let mut md = String::new();
        for i in 0..rows {
            let values = cols.iter().map(|c| c[i].as_str()).collect::<Vec<_>>();
            md += &build_row(&values);
            if i == 0 {
                md += &align_row();
            }
        }
        Ok(md)
    }
}
