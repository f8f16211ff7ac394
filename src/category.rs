use std::fmt;
use std::str::FromStr;

/// A group of files that can be discovered and ejected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileCategory {
    Script,
    Stylesheet,
    Scss,
    Less,
    Webfont,
}

pub const ALL_CATEGORIES: [FileCategory; 5] = [
    FileCategory::Script,
    FileCategory::Stylesheet,
    FileCategory::Scss,
    FileCategory::Less,
    FileCategory::Webfont,
];

const DIST_AND_DOCS: &[&str] = &["dist/**/*", "docs/**/*"];

impl FileCategory {
    /// Key used in answers and as the destination sub-directory name.
    pub fn dir_name(self) -> &'static str {
        match self {
            FileCategory::Script => "js",
            FileCategory::Stylesheet => "css",
            FileCategory::Scss => "scss",
            FileCategory::Less => "less",
            FileCategory::Webfont => "fonts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Script => "JS",
            FileCategory::Stylesheet => "CSS",
            FileCategory::Scss => "SCSS",
            FileCategory::Less => "LESS",
            FileCategory::Webfont => "Webfonts",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileCategory::Script => &["js", "jsx", "ts", "tsx", "mjs", "es", "esm", "json"],
            FileCategory::Stylesheet => &["css"],
            FileCategory::Scss => &["scss", "sass"],
            FileCategory::Less => &["less"],
            FileCategory::Webfont => &["eot", "ttf", "woff", "woff2", "svg"],
        }
    }

    /// Glob patterns in priority order. The first one that matches anything wins.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            FileCategory::Script => &[
                "js/**/*.{js,jsx,ts,tsx,mjs,es,esm,json}",
                "**/*.{js,jsx,ts,tsx,mjs,es,esm,json}",
            ],
            FileCategory::Stylesheet => &["css/**/*.css", "**/*.css"],
            FileCategory::Scss => &["{scss,sass}/**/*.{scss,sass}", "**/*.{scss,sass}"],
            FileCategory::Less => &["less/**/*.less", "**/*.less"],
            FileCategory::Webfont => &[
                "*font*/**/*.{eot,ttf,woff,woff2,svg}",
                "**/*.{eot,ttf,woff,woff2,svg}",
            ],
        }
    }

    /// Paths never returned for this category, whichever pattern matched.
    pub fn excludes(self) -> &'static [&'static str] {
        match self {
            FileCategory::Script => &["dist/**/*", "docs/**/*", "package.json"],
            FileCategory::Stylesheet | FileCategory::Webfont => DIST_AND_DOCS,
            FileCategory::Scss | FileCategory::Less => &[],
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.dir_name().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown file type: {}", s))
    }
}
