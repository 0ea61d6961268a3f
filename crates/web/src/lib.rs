//! HTML page generation for catalog collections.
//!
//! Each collection type is published as one page built from a user-provided
//! [upon] template. The template syntax follows upon's Mustache-like
//! conventions (`{{ variable }}`, `{{ value|formatter }}`,
//! `{% for x in list %}`), extended with a few catalog-specific helpers:
//!
//! - **`slug`**: converts strings to URL-safe slugs (for anchors), stripping
//!   quotation marks first.
//! - **`timestamp`**: formats a chapter offset in milliseconds as `h:mm:ss`.
//! - **`date`**: formats a `YYYY-MM-DD` release date as `DD.MM.YYYY`; other
//!   values are printed verbatim.
//! - **`pad`**: zero-pads a number, usable as `pad(episode.number, 3)`.
//!
//! # Template Variables
//!
//! | Variable           | Type                  | Description                                  |
//! |--------------------|-----------------------|----------------------------------------------|
//! | `collection.key`   | `String`              | Serialized collection key (e.g. `"serie"`)   |
//! | `collection.name`  | `String`              | Display name (e.g. `"Serie"`)                |
//! | `host`             | `String`              | Host of the web data URL                     |
//! | `base_url`         | `String`              | The web data URL itself                      |
//! | `count`            | `i64`                 | Number of episodes in the collection         |
//! | `episodes`         | list                  | Episodes in listing order, see below         |
//!
//! Every episode carries `number`, `title`, `author`, `script_author`,
//! `description`, `release_date`, `chapters` (each with `title`, `start`,
//! `end`), `speakers` (a list of name lists), `links` (`json`, `ffmetadata`,
//! `xld_log`, `cover`, `cover_itunes`, `cover_kosmos` as absolute URLs) and
//! `parts`. Parts carry the same unit fields plus `number` and `letter`.
//! Absent values are `none`, absent lists are empty.
//!
//! # Example
//!
//! ```
//! use dreimeta_catalog::models::{Catalog, CollectionType, Episode, RecordingUnit};
//! use dreimeta_web::{PageBuilder, SiteContext};
//!
//! let catalog = Catalog::new(vec![Episode::with_unit(1, RecordingUnit::titled("und der Super-Papagei"))]);
//! let site = SiteContext::new("https://dreimetadaten.de/data").unwrap();
//! let builder: PageBuilder = "{% for e in episodes %}{{ pad(e.number, 3) }}: {{ e.title }}{% endfor %}".parse().unwrap();
//! let page = builder.render(&catalog, CollectionType::Series, &site).unwrap();
//! assert_eq!(page, "001: und der Super-Papagei");
//! ```

pub mod error;

use crate::error::{Error, ErrorKind, Result};
use dreimeta_catalog::models::{Catalog, Chapter, CollectionType, Episode, Links, Part, RecordingUnit};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template, Value};
use url::Url;

/// Where the published web data lives.
///
/// Relative catalog links are resolved against [`base_url`](Self::base_url).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    base_url: Url,
    /// The base URL as a directory: no query or fragment, trailing slash.
    root: Url,
}
impl SiteContext {
    /// Accepts an absolute `http`/`https` URL with a host.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let input = base_url.as_ref();
        let base_url = Url::parse(input).or_raise(|| ErrorKind::InvalidUrl(input.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none_or(str::is_empty) {
            exn::bail!(ErrorKind::InvalidUrl(input.to_string()));
        }
        let mut root = base_url.clone();
        root.set_query(None);
        root.set_fragment(None);
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self { base_url, root })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Turns a catalog link into an absolute URL. Catalog links are relative
    /// to the data directory even with a leading slash; links that already
    /// carry a scheme are returned as they are.
    pub fn resolve(&self, link: &str) -> String {
        match Url::parse(link) {
            Ok(absolute) => absolute.into(),
            Err(_) => self
                .root
                .join(link.trim_start_matches('/'))
                .map_or_else(|_| link.to_string(), String::from),
        }
    }
}

/// Renders collection pages from a user-defined template string.
///
/// Constructed via [`FromStr`], which compiles the template eagerly so that
/// syntax errors surface at creation time rather than at render time. The
/// compiled template is reusable across collections.
pub struct PageBuilder {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for PageBuilder {
    type Err = Error;

    /// Compiles the given template string with the catalog formatters and
    /// functions registered. Returns [`ErrorKind::Template`] if the template
    /// syntax is invalid.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}
impl PageBuilder {
    /// Renders the page of one collection.
    #[instrument(skip_all, fields(collection = %collection))]
    pub fn render(&self, catalog: &Catalog, collection: CollectionType, site: &SiteContext) -> Result<String> {
        self.template
            .render(&self.engine, Self::parameters(catalog, collection, site))
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    /// Builds the [`upon::Value`] map exposed to the template engine.
    fn parameters(catalog: &Catalog, collection: CollectionType, site: &SiteContext) -> Value {
        let episodes = catalog.collection(collection);
        upon::value! {
            collection: upon::value! {
                key: text(collection.key()),
                name: text(collection.name()),
            },
            host: text(site.host()),
            base_url: text(site.base_url()),
            count: integer(episodes.len()),
            episodes: Value::List(episodes.iter().map(|e| episode(e, site)).collect()),
        }
    }
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

fn optional_text(s: Option<&str>) -> Value {
    s.map_or(Value::None, text)
}

fn integer(n: impl TryInto<i64>) -> Value {
    n.try_into().map_or(Value::None, Value::Integer)
}

fn episode(episode: &Episode, site: &SiteContext) -> Value {
    let mut fields = unit(episode, site);
    fields.insert("number".to_string(), integer(episode.number()));
    fields.insert("parts".to_string(), Value::List(episode.parts().iter().map(|p| part(p, site)).collect()));
    Value::Map(fields)
}

fn part(part: &Part, site: &SiteContext) -> Value {
    let mut fields = unit(part, site);
    fields.insert("number".to_string(), integer(part.number()));
    fields.insert("letter".to_string(), optional_text(part.letter()));
    Value::Map(fields)
}

fn unit(unit: &RecordingUnit, site: &SiteContext) -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("title".to_string(), optional_text(unit.title.as_deref())),
        ("author".to_string(), optional_text(unit.author.as_deref())),
        ("script_author".to_string(), optional_text(unit.script_author.as_deref())),
        ("description".to_string(), optional_text(unit.description.as_deref())),
        ("release_date".to_string(), optional_text(unit.release_date.as_deref())),
        ("chapters".to_string(), Value::List(unit.chapters().iter().map(chapter).collect())),
        (
            "speakers".to_string(),
            Value::List(
                unit.speakers()
                    .iter()
                    .map(|group| Value::List(group.iter().map(|name| text(name)).collect()))
                    .collect(),
            ),
        ),
        ("links".to_string(), links(unit.links.as_ref(), site)),
    ])
}

fn chapter(chapter: &Chapter) -> Value {
    upon::value! {
        title: text(chapter.title()),
        start: chapter.start().map_or(Value::None, Value::Integer),
        end: chapter.end().map_or(Value::None, Value::Integer),
    }
}

/// Every link name is present so templates can test for it.
fn links(links: Option<&Links>, site: &SiteContext) -> Value {
    let mut fields: BTreeMap<String, Value> = ["json", "ffmetadata", "xld_log", "cover", "cover_itunes", "cover_kosmos"]
        .into_iter()
        .map(|name| (name.to_string(), Value::None))
        .collect();
    for (name, link) in links.into_iter().flat_map(Links::iter) {
        fields.insert(name.to_string(), Value::String(site.resolve(link)));
    }
    Value::Map(fields)
}

/// Custom [`upon`] extensions for catalog pages.
mod addons {
    use rslug::slugify;
    use std::fmt::Write;
    use time::{Date, Month};
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Converts strings to URL-safe slugs, stripping quotation marks first.
    fn slug_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                // Various quotation marks: '"''""„"`«»
                let marks = [
                    '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}',
                    '\u{0060}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
                ];
                let stripped: String = s.chars().filter(|c| !marks.contains(c)).collect();
                write!(f, "{}", slugify!(&stripped))?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Milliseconds as `h:mm:ss`.
    fn timestamp_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::Integer(ms) if *ms >= 0 => write!(f, "{}", timestamp(*ms))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// `YYYY-MM-DD` as `DD.MM.YYYY`.
    fn date_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => match calendar_date(s) {
                Some(date) => write!(f, "{:02}.{:02}.{}", date.day(), u8::from(date.month()), date.year())?,
                None => write!(f, "{s}")?,
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(crate) fn timestamp(ms: i64) -> String {
        let seconds = ms / 1000;
        format!("{}:{:02}:{:02}", seconds / 3600, seconds / 60 % 60, seconds % 60)
    }

    pub(crate) fn calendar_date(s: &str) -> Option<Date> {
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let month = Month::try_from(parts.next()?.parse::<u8>().ok()?).ok()?;
        let day = parts.next()?.parse::<u8>().ok()?;
        Date::from_calendar_date(year, month, day).ok()
    }

    fn pad(number: i64, width: usize) -> String {
        format!("{number:0width$}")
    }

    /// Registers the formatters and functions on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("slug", slug_formatter);
        engine.add_formatter("timestamp", timestamp_formatter);
        engine.add_formatter("date", date_formatter);
        engine.add_function("pad", pad);
    }
}
