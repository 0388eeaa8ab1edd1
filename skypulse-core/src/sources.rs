use serde::Deserialize;

use crate::model::SourceCitation;

/// Title used when a grounding chunk has no title.
pub const DEFAULT_SOURCE_TITLE: &str = "Google Weather";
/// Placeholder URI; citations carrying it are dropped.
pub const PLACEHOLDER_URI: &str = "#";

/// One entry of `groundingMetadata.groundingChunks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Map a chunk to a citation, filling in the sentinel title and URI.
pub fn to_citation(chunk: &GroundingChunk) -> SourceCitation {
    let web = chunk.web.as_ref();
    let title = web
        .and_then(|w| w.title.as_deref())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_SOURCE_TITLE);
    let uri = web
        .and_then(|w| w.uri.as_deref())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(PLACEHOLDER_URI);

    SourceCitation { title: title.to_string(), uri: uri.to_string() }
}

/// Citations with a real URI, in the order the service returned them, without duplicates.
pub fn collect_sources(chunks: &[GroundingChunk]) -> Vec<SourceCitation> {
    let mut sources: Vec<SourceCitation> = Vec::with_capacity(chunks.len());

    for citation in chunks.iter().map(to_citation) {
        if citation.uri == PLACEHOLDER_URI || sources.iter().any(|s| s.uri == citation.uri) {
            continue;
        }
        sources.push(citation);
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(title: Option<&str>, uri: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebChunk { title: title.map(String::from), uri: uri.map(String::from) }),
        }
    }

    #[test]
    fn missing_fields_get_sentinels() {
        let citation = to_citation(&GroundingChunk::default());
        assert_eq!(citation.title, DEFAULT_SOURCE_TITLE);
        assert_eq!(citation.uri, PLACEHOLDER_URI);
    }

    #[test]
    fn placeholder_and_absent_uris_are_dropped() {
        let chunks = [
            chunk(Some("IQAir"), Some("#")),
            chunk(Some("No link"), None),
            chunk(None, Some("")),
            GroundingChunk::default(),
        ];
        assert!(collect_sources(&chunks).is_empty());
    }

    #[test]
    fn real_uri_keeps_title_or_defaults_it() {
        let chunks = [
            chunk(Some("nchmf.gov.vn"), Some("https://nchmf.gov.vn/")),
            chunk(None, Some("https://www.iqair.com/vietnam")),
        ];
        let sources = collect_sources(&chunks);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "nchmf.gov.vn");
        assert_eq!(sources[1].title, DEFAULT_SOURCE_TITLE);
        assert_eq!(sources[1].uri, "https://www.iqair.com/vietnam");
    }

    #[test]
    fn duplicate_uris_keep_first() {
        let chunks = [
            chunk(Some("first"), Some("https://a.example/")),
            chunk(Some("second"), Some("https://a.example/")),
        ];
        let sources = collect_sources(&chunks);
        assert_eq!(sources, vec![SourceCitation {
            title: "first".into(),
            uri: "https://a.example/".into()
        }]);
    }

    #[test]
    fn chunks_deserialize_from_wire_shape() {
        let chunks: Vec<GroundingChunk> = serde_json::from_str(
            r#"[{"web":{"uri":"https://x.example","title":"x"}},{"retrievedContext":{}}]"#,
        )
        .unwrap();
        assert_eq!(collect_sources(&chunks).len(), 1);
    }
}
