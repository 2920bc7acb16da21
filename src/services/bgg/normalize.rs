//! Flattens legacy BoardGameGeek game records into display records.
//!
//! The legacy XML API is loosely shaped: any field may be missing, a bare
//! text element, an attributed element, or repeated. Each field's shape is
//! made explicit as a [`FieldValue`] before any flattening happens, so the
//! per-shape policy is a single `match` instead of scattered probing.

use roxmltree::{Document, Node};

use crate::error::{AppError, AppResult};
use crate::models::GameDisplayRecord;

/// The shapes a legacy BGG field shows up in.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    /// Bare element text, e.g. `<yearpublished>2017</yearpublished>`.
    Scalar(String),
    /// A single attributed element with a text payload.
    Node(TextEntry),
    /// Repeated elements, in source order.
    Many(Vec<TextEntry>),
}

/// Text payload of one attributed element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub text: String,
    /// The `primary="true"` marker carried by name entries.
    pub primary: bool,
}

impl FieldValue {
    /// Single text payload, whatever shape the source used. Lists keep
    /// their first entry, which reflects source display priority.
    fn into_text(self) -> String {
        match self {
            FieldValue::Absent => String::new(),
            FieldValue::Scalar(text) => text,
            FieldValue::Node(entry) => entry.text,
            FieldValue::Many(entries) => entries
                .into_iter()
                .next()
                .map(|entry| entry.text)
                .unwrap_or_default(),
        }
    }

    /// Text payload parsed as a float; absent or malformed text stays
    /// absent instead of failing the record.
    fn into_number(self) -> Option<f64> {
        let text = self.into_text();
        if text.is_empty() {
            return None;
        }
        text.parse().ok()
    }

    /// All text payloads in source order; a lone entry becomes a
    /// one-entry list.
    fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Absent => Vec::new(),
            FieldValue::Scalar(text) => vec![text],
            FieldValue::Node(entry) => vec![entry.text],
            FieldValue::Many(entries) => entries.into_iter().map(|entry| entry.text).collect(),
        }
    }
}

/// Parses a legacy `/xmlapi/boardgame/{id}?stats=1` response and
/// normalizes the first game record in it.
///
/// Field-sparse records always normalize; only a payload that cannot be
/// parsed as XML at all fails, and the caller renders that as a
/// "could not load" state.
pub fn parse_game_record(xml: &str) -> AppResult<GameDisplayRecord> {
    let doc = Document::parse(xml)
        .map_err(|e| AppError::ExternalApi(format!("unparsable BGG payload: {e}")))?;

    let game = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("boardgame"))
        .ok_or_else(|| AppError::ExternalApi("BGG payload holds no game record".to_string()))?;

    // Unknown ids come back as a well-formed record holding only an
    // error element.
    if let Some(error) = game.children().find(|node| node.has_tag_name("error")) {
        let message = error.attribute("message").unwrap_or("unknown BGG error");
        return Err(AppError::NotFound(format!("BGG: {message}")));
    }

    Ok(normalize_game(game))
}

fn normalize_game(game: Node) -> GameDisplayRecord {
    let mut record = GameDisplayRecord {
        object_id: game.attribute("objectid").unwrap_or_default().to_string(),
        ..GameDisplayRecord::default()
    };

    let (primary_name, names) = split_names(field(game, "name"));
    record.primary_name = primary_name;
    record.names = names;

    record.description = field(game, "description").into_text();
    record.thumbnail = field(game, "thumbnail").into_text();
    record.image = field(game, "image").into_text();

    record.year_published = field(game, "yearpublished").into_number();
    record.min_players = field(game, "minplayers").into_number();
    record.max_players = field(game, "maxplayers").into_number();
    record.playing_time = field(game, "playingtime").into_number();
    record.min_playtime = field(game, "minplaytime").into_number();
    record.max_playtime = field(game, "maxplaytime").into_number();
    record.age = field(game, "age").into_number();

    record.categories = field(game, "boardgamecategory").into_list();
    record.mechanics = field(game, "boardgamemechanic").into_list();
    record.families = field(game, "boardgamefamily").into_list();
    record.subdomains = field(game, "boardgamesubdomain").into_list();
    record.publishers = field(game, "boardgamepublisher").into_list();
    record.designers = field(game, "boardgamedesigner").into_list();
    record.artists = field(game, "boardgameartist").into_list();
    record.honors = field(game, "boardgamehonor").into_list();

    let (average, average_weight) = extract_ratings(game);
    record.average = average;
    record.average_weight = average_weight;

    record
}

/// Collects one field's child elements into its explicit shape.
fn field(game: Node, tag: &str) -> FieldValue {
    let mut matches = game
        .children()
        .filter(|node| node.is_element() && node.has_tag_name(tag));

    let Some(first) = matches.next() else {
        return FieldValue::Absent;
    };
    let rest: Vec<Node> = matches.collect();

    if rest.is_empty() {
        if first.attributes().next().is_none() {
            FieldValue::Scalar(element_text(first))
        } else {
            FieldValue::Node(entry(first))
        }
    } else {
        let mut entries = vec![entry(first)];
        entries.extend(rest.into_iter().map(entry));
        FieldValue::Many(entries)
    }
}

fn element_text(node: Node) -> String {
    node.text().unwrap_or_default().trim().to_string()
}

fn entry(node: Node) -> TextEntry {
    TextEntry {
        text: element_text(node),
        primary: node.attribute("primary").is_some_and(|value| !value.is_empty()),
    }
}

/// Splits name entries into the primary display name and the full
/// alternate-names list (primary included, source order kept).
///
/// The source does not promise exactly one primary flag: with none set
/// the first entry wins, with several set the first flagged entry wins.
fn split_names(value: FieldValue) -> (String, Vec<String>) {
    let entries = match value {
        FieldValue::Absent => Vec::new(),
        FieldValue::Scalar(text) => vec![TextEntry {
            text,
            primary: false,
        }],
        FieldValue::Node(entry) => vec![entry],
        FieldValue::Many(entries) => entries,
    };

    let primary = entries
        .iter()
        .find(|entry| entry.primary)
        .or_else(|| entries.first())
        .map(|entry| entry.text.clone())
        .unwrap_or_default();
    let names = entries.into_iter().map(|entry| entry.text).collect();

    (primary, names)
}

/// Lifts `statistics/ratings/average` and `statistics/ratings/averageweight`
/// to top-level numerics; every other statistics sub-field is dropped.
fn extract_ratings(game: Node) -> (Option<f64>, Option<f64>) {
    let Some(ratings) = game
        .children()
        .find(|node| node.has_tag_name("statistics"))
        .and_then(|statistics| {
            statistics
                .children()
                .find(|node| node.has_tag_name("ratings"))
        })
    else {
        return (None, None);
    };

    let number = |tag: &str| -> Option<f64> {
        ratings
            .children()
            .find(|node| node.has_tag_name(tag))
            .and_then(|node| node.text())
            .and_then(|text| text.trim().parse().ok())
    };

    (number("average"), number("averageweight"))
}
