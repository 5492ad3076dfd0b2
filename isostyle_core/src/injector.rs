use std::cell::RefCell;
use std::rc::Rc;

use crate::compose::compose_css_text;
use crate::error::StyleResult;
use crate::host::StyleHost;
use crate::options::InsertOptions;
use crate::record::StyleRecord;
use crate::registry::InsertedRegistry;
use crate::suffix::{SuffixSource, ThreadRandom};
use crate::ID_PREFIX;

/// Inserts `<style>` elements for extracted CSS and reference-counts them.
///
/// The registry lives as long as the injector and the disposers it handed out.
pub struct StyleInjector<H, R = ThreadRandom> {
    host: H,
    registry: Rc<RefCell<InsertedRegistry>>,
    suffixes: RefCell<R>,
}

impl<H: StyleHost + Clone> StyleInjector<H> {
    pub fn new(host: H) -> Self {
        Self::with_suffixes(host, ThreadRandom)
    }
}

impl<H, R> StyleInjector<H, R>
where
    H: StyleHost + Clone,
    R: SuffixSource,
{
    pub fn with_suffixes(host: H, suffixes: R) -> Self {
        Self {
            host,
            registry: Rc::new(RefCell::new(InsertedRegistry::new())),
            suffixes: RefCell::new(suffixes),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reference count of a generated style id.
    pub fn ref_count(&self, id: &str) -> i64 {
        self.registry.borrow().count(id)
    }

    /// Applies `styles` to the document head.
    ///
    /// Each record gets an id `"<moduleId>-<index>-<random>"`, unique among the
    /// ids of this call. An id that is already referenced only has its count
    /// bumped unless `options.replace` is set. The returned [`Disposer`]
    /// releases exactly the ids of this call.
    ///
    /// A host error aborts the call: records already processed keep their
    /// counts and elements, and no disposer is returned for them.
    pub fn insert(&self, styles: &[StyleRecord], options: InsertOptions) -> StyleResult<Disposer<H>> {
        let caps = self.host.capabilities();
        let text_write = caps.text_write();
        let mut ids: Vec<String> = Vec::with_capacity(styles.len());

        for (i, record) in styles.iter().enumerate() {
            let id = self.next_id(record, i, &ids);
            ids.push(id.clone());

            {
                let mut registry = self.registry.borrow_mut();
                if registry.is_live(&id) && !options.replace {
                    registry.retain(&id);
                    continue;
                }
                registry.reset(&id);
            }

            let dom_id = format!("{}{}", ID_PREFIX, id);
            let (el, create) = match self.host.find_element(&dom_id) {
                Some(el) => (el, false),
                None => (
                    self.host
                        .create_style_element(&dom_id, record.media.as_deref())?,
                    true,
                ),
            };

            let encoder = caps
                .base64
                .then_some(|bytes: &[u8]| self.host.encode_base64(bytes));
            let text = compose_css_text(&record.css, record.source_map.as_ref(), &id, encoder)?;
            self.host.write_text(&el, &text, text_write)?;

            if create {
                self.host.attach_to_head(&el, options.placement())?;
            }
        }

        Ok(Disposer {
            host: self.host.clone(),
            registry: self.registry.clone(),
            ids,
        })
    }

    fn next_id(&self, record: &StyleRecord, index: usize, taken: &[String]) -> String {
        let mut suffixes = self.suffixes.borrow_mut();
        loop {
            let id = format!("{}-{}-{}", record.module_id, index, suffixes.next_suffix());
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

/// Releases the styles of one [`StyleInjector::insert`] call.
#[derive(Clone)]
pub struct Disposer<H> {
    host: H,
    registry: Rc<RefCell<InsertedRegistry>>,
    ids: Vec<String>,
}

impl<H: StyleHost> Disposer<H> {
    /// The ids generated by the insert call, in record order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Decrements every id and removes the elements no longer referenced.
    ///
    /// Calling this again keeps decrementing; elements already gone are skipped.
    pub fn dispose(&self) -> StyleResult<()> {
        for id in &self.ids {
            let count = self.registry.borrow_mut().release(id);
            if count < 0 {
                crate::warn!("isostyle: style `{}` released more often than inserted ({})", id, count);
            }
            if count <= 0
                && let Some(el) = self.host.find_element(&format!("{}{}", ID_PREFIX, id))
            {
                self.host.remove_element(&el)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::suffix::FixedSuffixes;
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde_json::json;

    fn injector(suffixes: impl IntoIterator<Item = u32>) -> StyleInjector<MemoryHost, FixedSuffixes> {
        StyleInjector::with_suffixes(MemoryHost::new(), FixedSuffixes::new(suffixes))
    }

    #[test]
    fn test_insert_and_dispose_single() {
        let inj = injector([42]);
        let dispose = inj
            .insert(&[StyleRecord::new(1, "body{color:red}")], InsertOptions::default())
            .unwrap();

        assert_eq!(dispose.ids(), ["1-0-42"]);
        let styles = inj.host().style_elements();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].id().as_deref(), Some("s1-0-42"));
        assert_eq!(styles[0].attribute("type").as_deref(), Some("text/css"));
        assert_eq!(styles[0].attribute("media"), None);
        assert_eq!(styles[0].text(), "body{color:red}");
        assert_eq!(inj.ref_count("1-0-42"), 1);

        dispose.dispose().unwrap();
        assert!(inj.host().style_elements().is_empty());
        assert_eq!(inj.ref_count("1-0-42"), 0);
    }

    #[test]
    fn test_ids_use_record_index() {
        let inj = injector([1, 2]);
        let dispose = inj
            .insert(
                &[StyleRecord::new("a", "x{}"), StyleRecord::new("b", "y{}")],
                InsertOptions::default(),
            )
            .unwrap();
        assert_eq!(dispose.ids(), ["a-0-1", "b-1-2"]);
    }

    #[test]
    fn test_retries_on_local_collision() {
        // A suffix that collides with an id of the same call is drawn again.
        let taken = vec!["1-0-7".to_string()];
        let inj = injector([7, 7, 8]);
        let id = inj.next_id(&StyleRecord::new(1, "a{}"), 0, &taken);
        assert_eq!(id, "1-0-8");
    }

    #[test]
    fn test_one_suffix_draw_per_record() {
        let draws = Rc::new(RefCell::new(0u32));
        let counter = draws.clone();
        let source = move || {
            *counter.borrow_mut() += 1;
            *counter.borrow()
        };
        let inj = StyleInjector::with_suffixes(MemoryHost::new(), source);
        let records = [StyleRecord::new("k", "a{}"), StyleRecord::new("k", "b{}")];
        let dispose = inj.insert(&records, InsertOptions::default()).unwrap();
        assert_eq!(dispose.ids(), ["k-0-1", "k-1-2"]);
        assert_eq!(*draws.borrow(), 2);
    }

    #[test]
    fn test_repeat_insert_increments_instead_of_duplicating() {
        let inj = injector([3]);
        let records = [StyleRecord::new(1, "a{}")];
        let first = inj.insert(&records, InsertOptions::default()).unwrap();
        let second = inj.insert(&records, InsertOptions::default()).unwrap();

        assert_eq!(first.ids(), second.ids());
        assert_eq!(inj.ref_count("1-0-3"), 2);
        assert_eq!(inj.host().style_elements().len(), 1);

        first.dispose().unwrap();
        assert_eq!(inj.ref_count("1-0-3"), 1);
        assert_eq!(inj.host().style_elements().len(), 1);

        second.dispose().unwrap();
        assert_eq!(inj.ref_count("1-0-3"), 0);
        assert!(inj.host().style_elements().is_empty());
    }

    #[test]
    fn test_non_replacing_repeat_skips_write() {
        let inj = injector([3]);
        inj.insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        inj.insert(&[StyleRecord::new(1, "b{}")], InsertOptions::default())
            .unwrap();
        assert_eq!(inj.host().style_elements()[0].text(), "a{}");
    }

    #[test]
    fn test_replace_overwrites_and_resets() {
        let inj = injector([3]);
        inj.insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        inj.insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        assert_eq!(inj.ref_count("1-0-3"), 2);

        let dispose = inj
            .insert(&[StyleRecord::new(1, "b{}")], InsertOptions::new().replace(true))
            .unwrap();
        assert_eq!(inj.ref_count("1-0-3"), 1);
        let styles = inj.host().style_elements();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].text(), "b{}");

        dispose.dispose().unwrap();
        assert!(inj.host().style_elements().is_empty());
    }

    #[test]
    fn test_double_dispose_goes_negative() {
        let inj = injector([3]);
        let dispose = inj
            .insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        dispose.dispose().unwrap();
        dispose.dispose().unwrap();
        assert_eq!(inj.ref_count("1-0-3"), -1);
        assert!(inj.host().style_elements().is_empty());
    }

    #[test]
    fn test_insert_after_full_release_recreates() {
        let inj = injector([3]);
        let records = [StyleRecord::new(1, "a{}")];
        let dispose = inj.insert(&records, InsertOptions::default()).unwrap();
        dispose.dispose().unwrap();
        dispose.dispose().unwrap();

        inj.insert(&records, InsertOptions::default()).unwrap();
        assert_eq!(inj.ref_count("1-0-3"), 1);
        assert_eq!(inj.host().style_elements().len(), 1);
    }

    #[test]
    fn test_prepend_and_append() {
        let inj = injector([1, 2]);
        inj.host().append_foreign("title");

        inj.insert(&[StyleRecord::new(1, "a{}")], InsertOptions::new().prepend(true))
            .unwrap();
        inj.insert(&[StyleRecord::new(2, "b{}")], InsertOptions::default())
            .unwrap();

        let children = inj.host().head_children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].id().as_deref(), Some("s1-0-1"));
        assert_eq!(children[1].tag(), "title");
        assert_eq!(children[2].id().as_deref(), Some("s2-0-2"));
    }

    #[test]
    fn test_media_attribute() {
        let inj = injector([1]);
        inj.insert(
            &[StyleRecord::new(1, "a{}").media("screen and (min-width: 600px)")],
            InsertOptions::default(),
        )
        .unwrap();
        assert_eq!(
            inj.host().style_elements()[0].attribute("media").as_deref(),
            Some("screen and (min-width: 600px)")
        );
    }

    #[test]
    fn test_source_map_comments() {
        let inj = injector([9]);
        let map = json!({"version": 3, "file": "app.css", "mappings": "AAAA", "names": ["ß"]});
        inj.insert(
            &[StyleRecord::new(1, "a{}").source_map(map.clone())],
            InsertOptions::default(),
        )
        .unwrap();

        let text = inj.host().style_elements()[0].text();
        let (css, rest) = text.split_once('\n').unwrap();
        assert_eq!(css, "a{}");
        let (mapping, source_url) = rest.split_once('\n').unwrap();
        assert_eq!(source_url, "/*# sourceURL=app.css?1-0-9*/");

        let payload = mapping
            .strip_prefix("/*# sourceMappingURL=data:application/json;base64,")
            .and_then(|p| p.strip_suffix("*/"))
            .unwrap();
        let decoded: serde_json::Value =
            serde_json::from_slice(&STANDARD.decode(payload).unwrap()).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_source_map_skipped_without_base64() {
        let inj = StyleInjector::with_suffixes(
            MemoryHost::new().without_base64(),
            FixedSuffixes::new([9]),
        );
        inj.insert(
            &[StyleRecord::new(1, "a{}").source_map(json!({"file": "app.css"}))],
            InsertOptions::default(),
        )
        .unwrap();
        assert_eq!(inj.host().style_elements()[0].text(), "a{}");
    }

    #[test]
    fn test_legacy_stylesheet_write() {
        let inj = StyleInjector::with_suffixes(
            MemoryHost::new().legacy_stylesheet(),
            FixedSuffixes::new([9]),
        );
        inj.insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        let el = inj.host().style_elements()[0].clone();
        assert_eq!(el.legacy_css_text().as_deref(), Some("a{}"));
        assert_eq!(el.text(), "");
    }

    #[test]
    fn test_dispose_tolerates_external_removal() {
        let inj = injector([1]);
        let dispose = inj
            .insert(&[StyleRecord::new(1, "a{}")], InsertOptions::default())
            .unwrap();
        let el = inj.host().style_elements()[0].clone();
        inj.host().remove_element(&el).unwrap();

        dispose.dispose().unwrap();
        assert_eq!(inj.ref_count("1-0-1"), 0);
    }

    #[test]
    fn test_empty_insert() {
        let inj = injector([1]);
        let dispose = inj.insert(&[], InsertOptions::default()).unwrap();
        assert!(dispose.ids().is_empty());
        dispose.dispose().unwrap();
        assert!(inj.host().head_children().is_empty());
    }
}
