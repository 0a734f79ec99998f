//! The static report text streamed to clients.
//!
//! The same three-paragraph Hebrew sample is available either with inline
//! HTML markup (one `<p>` per line) or as plain text. Both variants have the
//! same line structure, so clients see the same number of segments and link
//! frames regardless of the format.

use core::{fmt, str::FromStr};

/// Sample report with inline HTML markup.
pub const HTML_REPORT_TEXT: &str = concat!(
    "<p>זהו <strong>טקסט דמה</strong> בעברית שנועד להמחיש את <em>הזרמת הנתונים</em> באופן מדורג.</p>\n",
    "<p><u>כאן אנו מוסיפים</u> עוד כמה משפטים כדי <strong>ליצור קטע</strong> ארוך יותר שניתן להזרימו לממשק המשתמש.</p>\n",
    "<p>בנוסף, הקטע האחרון בזרימה מסומן כ'סיכום' להשלמת <em>הדוגמה</em>.</p>",
);

/// Sample report without markup.
pub const PLAIN_REPORT_TEXT: &str = concat!(
    "זהו טקסט דמה בעברית שנועד להמחיש את הזרמת הנתונים באופן מדורג.\n",
    "כאן אנו מוסיפים עוד כמה משפטים כדי ליצור קטע ארוך יותר שניתן להזרימו לממשק המשתמש.\n",
    "בנוסף, הקטע האחרון בזרימה מסומן כ'סיכום' להשלמת הדוגמה.",
);

/// How the streamed report text is formatted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    /// Paragraphs wrapped in inline HTML markup.
    #[default]
    Html,
    /// Plain text.
    Plain,
}

impl ContentFormat {
    /// The sample report text in this format.
    #[must_use]
    pub const fn source_text(self) -> &'static str {
        match self {
            Self::Html => HTML_REPORT_TEXT,
            Self::Plain => PLAIN_REPORT_TEXT,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(format!(
                "unknown content format `{other}` (expected `html` or `plain`)"
            )),
        }
    }
}
