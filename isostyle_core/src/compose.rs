use crate::error::StyleResult;
use crate::record::SourceMap;

/// Builds the text written into a style element.
///
/// With a source map and an encoder, appends a `sourceMappingURL` data-URI
/// comment and a `sourceURL` comment tagged with the style id. Without an
/// encoder the CSS is returned unchanged.
pub fn compose_css_text<E>(
    css: &str,
    source_map: Option<&SourceMap>,
    id: &str,
    encode_base64: Option<E>,
) -> StyleResult<String>
where
    E: FnOnce(&[u8]) -> StyleResult<String>,
{
    let (Some(map), Some(encode)) = (source_map, encode_base64) else {
        return Ok(css.to_string());
    };

    let payload = encode(map.to_json()?.as_bytes())?;
    Ok(format!(
        "{css}\n/*# sourceMappingURL=data:application/json;base64,{payload}*/\n/*# sourceURL={file}?{id}*/",
        file = map.file(),
    ))
}
