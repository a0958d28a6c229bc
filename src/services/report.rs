// src/services/report.rs

//! XHTML report rendering.
//!
//! Lays out a [`Classification`] in the style of an arXiv listing page:
//! one section per reported bucket, each entry with its links, metadata,
//! and abstract. All record text is escaped before interpolation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::Record;
use crate::services::classifier::{Bucket, Classification, DateSpan};
use crate::utils::text::escape_html;

/// Characters left unescaped in author search URLs.
const AUTHOR_QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

const ARXIV_BASE: &str = "http://www.arxiv.org";

const HEAD: &str = r#"<link rel="stylesheet" type="text/css" media="screen" href="http://www.arxiv.org/css/arXiv.css?v=20161221" />
<script type="text/x-mathjax-config">
  MathJax.Hub.Config({tex2jax: {inlineMath: [['$','$']]}});
</script>
<script type="text/javascript" async
  src="https://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS_CHTML">
</script>
"#;

/// Renders classifications as standalone XHTML documents.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
}

impl ReportRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Full heading, e.g. `"ArXiv news report - Jan 02, 2017"`.
    pub fn heading(&self, classification: &Classification) -> String {
        format!(
            "{} - {}",
            self.title,
            date_range_label(classification.span())
        )
    }

    /// Render the whole document.
    pub fn render(&self, classification: &Classification) -> String {
        let heading = escape_html(&self.heading(classification));

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \
             \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n",
        );
        out.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\">\n<head>\n");
        out.push_str(&format!("<title>{heading}</title>\n"));
        out.push_str(HEAD);
        out.push_str("</head>\n<body><div id=\"content\"><div id=\"dlpage\">\n");
        out.push_str(&format!("<h1>{heading}</h1>\n"));
        out.push_str(&format!(
            "<small>[ {} ]</small><br/>\n",
            count_line(
                classification.reported_count(),
                classification.reported_new(),
                classification.reported_revisions()
            )
        ));

        for bucket in classification.sections() {
            render_section(&mut out, bucket);
        }

        out.push_str("</div></div></body>\n</html>\n");
        out
    }
}

/// Human-readable span of the reported dates.
pub fn date_range_label(span: Option<DateSpan>) -> String {
    let Some(span) = span else {
        return "no entries".to_string();
    };
    let days = span.days();
    if days <= 1 {
        span.max.format("%b %d, %Y").to_string()
    } else if days < 365 {
        format!(
            "{} to {}",
            span.min.format("%b %d"),
            span.max.format("%b %d, %Y")
        )
    } else {
        format!(
            "{} to {}",
            span.min.format("%b %d, %Y"),
            span.max.format("%b %d, %Y")
        )
    }
}

/// Count summary shown under headings.
pub fn count_line(total: usize, new: usize, revisions: usize) -> String {
    if total == 0 {
        "no entries".to_string()
    } else {
        format!("total of {total} entries ({new} new, {revisions} revisions)")
    }
}

fn render_section(out: &mut String, bucket: &Bucket) {
    out.push_str(&format!(
        "<h3>{}</h3>\n<small>[ {} ]</small><br/>\n<dl>\n",
        bucket.kind.caption(),
        count_line(bucket.len(), bucket.new_count(), bucket.revision_count())
    ));
    for (i, record) in bucket.ordered().enumerate() {
        render_entry(out, record, i + 1);
    }
    out.push_str("</dl>\n");
}

fn render_entry(out: &mut String, record: &Record, nr: usize) {
    let id = escape_html(&record.identifier);
    let revision = if record.is_revision { "(revision)" } else { "" };
    let authors = record
        .authors
        .iter()
        .map(|name| author_link(name))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str(&format!(
        "\n<dt>[{nr}]&nbsp; <span class=\"list-identifier\">\
         <a href=\"{ARXIV_BASE}/abs/{id}\" title=\"Abstract\">arXiv:{id}</a> \
         [<a href=\"{ARXIV_BASE}/pdf/{id}\" title=\"Download PDF\">pdf</a>, \
         <a href=\"{ARXIV_BASE}/format/{id}\" title=\"Other formats\">other</a>] \
         {revision}</span></dt>\n"
    ));
    out.push_str("<dd>\n<div class=\"meta\">\n");
    out.push_str(&format!(
        "<div class=\"list-title mathjax\">\n<span class=\"descriptor\">Title:</span>{}</div>\n",
        escape_html(record.title())
    ));
    out.push_str(&format!(
        "<div class=\"list-authors\">\n<span class=\"descriptor\">Authors:</span> {authors}\n</div>\n"
    ));
    if !record.comments().is_empty() {
        out.push_str(&format!(
            "<div class=\"list-comments\">\n<span class=\"descriptor\">Comments:</span> {}\n</div>\n",
            escape_html(record.comments())
        ));
    }
    out.push_str(&format!(
        "<div class=\"list-subjects\">\n<span class=\"descriptor\">Categories:</span> {}\n</div>\n",
        escape_html(record.categories())
    ));
    out.push_str(&format!(
        "<small>{}</small><br/>\n<p class=\"mathjax\">{}\n</p>\n",
        escape_html(record.date_label()),
        escape_html(record.abstract_text())
    ));
    out.push_str("</div>\n</dd>\n");
}

/// Link an author name to the arXiv author search.
fn author_link(name: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        author_search_url(name),
        escape_html(name)
    )
}

/// arXiv search URL for an author, keyed on last and first name.
pub fn author_search_url(name: &str) -> String {
    let mut parts = name.split(' ');
    let first = parts.next().unwrap_or("").replace('.', "");
    let last = name.rsplit(' ').next().unwrap_or("").replace('.', "");
    format!(
        "{ARXIV_BASE}/find/all/1/au:+{}_{}/0/1/0/all/0/1",
        utf8_percent_encode(&last, AUTHOR_QUERY_ENCODE_SET),
        utf8_percent_encode(&first, AUTHOR_QUERY_ENCODE_SET)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InterestLists, RawRecord};
    use crate::services::classifier::classify;
    use crate::services::matcher::Interests;
    use crate::services::validator::validate;
    use chrono::NaiveDate;

    fn record(id: &str, date: &str, authors: &str, comments: &str, is_revision: bool) -> Record {
        let fields = [
            ("arxiv", id),
            ("date", date),
            ("authors", authors),
            ("title", "Bounds for <maximal> functions"),
            ("abstract", "Let $f$ & $g$ be given."),
            ("categories", "math.CA"),
            ("comments", comments),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        validate(RawRecord {
            fields,
            is_revision,
        })
        .unwrap()
    }

    fn interests() -> Interests {
        Interests::compile(&InterestLists {
            authors: vec!["J. Roos".into()],
            ..InterestLists::default()
        })
        .0
    }

    fn span(min: (i32, u32, u32), max: (i32, u32, u32)) -> Option<DateSpan> {
        let at = |(y, m, d): (i32, u32, u32)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        Some(DateSpan {
            min: at(min),
            max: at(max),
        })
    }

    #[test]
    fn test_date_range_label() {
        assert_eq!(date_range_label(None), "no entries");
        assert_eq!(
            date_range_label(span((2017, 1, 2), (2017, 1, 3))),
            "Jan 03, 2017"
        );
        assert_eq!(
            date_range_label(span((2017, 1, 2), (2017, 1, 9))),
            "Jan 02 to Jan 09, 2017"
        );
        assert_eq!(
            date_range_label(span((2016, 1, 2), (2017, 1, 9))),
            "Jan 02, 2016 to Jan 09, 2017"
        );
    }

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(0, 0, 0), "no entries");
        assert_eq!(
            count_line(3, 2, 1),
            "total of 3 entries (2 new, 1 revisions)"
        );
    }

    #[test]
    fn test_author_search_url() {
        assert_eq!(
            author_search_url("J. R. Roos"),
            "http://www.arxiv.org/find/all/1/au:+Roos_J/0/1/0/all/0/1"
        );
        assert_eq!(
            author_search_url("Émile Picard"),
            "http://www.arxiv.org/find/all/1/au:+Picard_%C3%89mile/0/1/0/all/0/1"
        );
    }

    #[test]
    fn test_render_document() {
        let records = vec![
            record(
                "1701.00001",
                "Mon, 2 Jan 2017 10:00:00 GMT",
                "Joris Roos",
                "",
                true,
            ),
            record(
                "1701.00002",
                "Tue, 3 Jan 2017 10:00:00 GMT",
                "Joris Roos, Andreas Seeger",
                "12 pages",
                false,
            ),
        ];
        let classification = classify(&records, &interests(), false);
        let html = ReportRenderer::new("ArXiv news report").render(&classification);

        assert!(html.starts_with("<?xml"));
        assert!(html.contains("<title>ArXiv news report - Jan 03, 2017</title>"));
        assert!(html.contains("<h3>Author matches</h3>"));
        assert!(html.contains("<h3>Category matches</h3>"));
        assert!(!html.contains("<h3>Remaining</h3>"));
        assert!(html.contains("total of 2 entries (1 new, 1 revisions)"));

        // New entries are numbered before revisions.
        let first = html.find("[1]&nbsp;").unwrap();
        let second = html.find("[2]&nbsp;").unwrap();
        assert!(html[first..second].contains("arXiv:1701.00002"));
        assert!(html[second..].contains("(revision)"));

        assert!(html.contains("Bounds for &lt;maximal&gt; functions"));
        assert!(html.contains("Let $f$ &amp; $g$ be given."));
        assert_eq!(html.matches("list-comments").count(), 1);
        assert!(html.contains("au:+Seeger_Andreas"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_remaining_section() {
        let records = vec![record(
            "1701.00003",
            "Mon, 2 Jan 2017 10:00:00 GMT",
            "Jane Smith",
            "",
            false,
        )];
        let html = ReportRenderer::new("Digest").render(&classify(&records, &interests(), true));
        assert!(html.contains("<title>Digest - Jan 02, 2017</title>"));
        assert!(html.contains("<h3>Remaining</h3>"));

        let html = ReportRenderer::new("Digest").render(&classify(&records, &interests(), false));
        assert!(html.contains("<title>Digest - no entries</title>"));
        assert!(!html.contains("arXiv:1701.00003"));
    }
}
