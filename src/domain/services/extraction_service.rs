// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 单遍流式 HTML 提取
//!
//! 基于 html5ever 的分词器逐个处理标签与文本事件，不构建 DOM。
//! 每类目标由一个处理器负责，处理器只修改自己的累加器；
//! 内存占用只取决于带上限的输出集合与当前的元素嵌套深度。

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use crate::domain::models::extracted_document::{
    ExtractedDocument, ExtractedElement, OrderedUrlSet,
};
use crate::domain::models::extraction_request::Selector;
use crate::domain::services::text_service::collapse_whitespace;
use crate::utils::url_utils::resolve_reference;

/// 保留的 meta 名称白名单
pub const META_WHITELIST: &[&str] = &[
    "description",
    "keywords",
    "author",
    "robots",
    "viewport",
    "og:title",
    "og:description",
    "og:image",
    "og:url",
    "og:type",
    "og:site_name",
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
];

/// 选择器处理器最多跟踪的未闭合元素数
const MAX_TRACKED_DEPTH: usize = 4096;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// 非导航性质的链接协议
const NON_NAVIGATIONAL_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

fn attr<'a>(tag: &'a Tag, name: &str) -> Option<&'a str> {
    tag.attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| &*a.value)
}

fn non_empty_attr<'a>(tag: &'a Tag, name: &str) -> Option<&'a str> {
    attr(tag, name).filter(|v| !v.trim().is_empty())
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// 标题文本处理器
#[derive(Default)]
struct TitleHandler {
    inside: bool,
    text: String,
}

impl TitleHandler {
    fn start(&mut self) {
        self.inside = true;
    }

    fn end(&mut self) {
        self.inside = false;
    }

    fn text(&mut self, text: &str) {
        if self.inside {
            self.text.push_str(text);
        }
    }
}

/// meta 标签处理器
#[derive(Default)]
struct MetaHandler {
    meta: BTreeMap<String, String>,
}

impl MetaHandler {
    fn element(&mut self, tag: &Tag) {
        let Some(name) = non_empty_attr(tag, "name").or_else(|| non_empty_attr(tag, "property"))
        else {
            return;
        };
        let Some(content) = non_empty_attr(tag, "content") else {
            return;
        };

        let name = name.trim().to_ascii_lowercase();
        if META_WHITELIST.contains(&name.as_str()) {
            self.meta.insert(name, content.to_string());
        }
    }
}

/// 将属性值解析为绝对地址后放入集合的处理器
///
/// 单个引用解析失败只丢弃该条目
struct UrlCollector {
    set: OrderedUrlSet,
    dropped: usize,
}

impl UrlCollector {
    fn new(set: OrderedUrlSet) -> Self {
        Self { set, dropped: 0 }
    }

    fn collect(&mut self, base: &Url, reference: &str) {
        if self.set.is_full() {
            return;
        }
        match resolve_reference(base, reference) {
            Some(url) => {
                self.set.insert(url.into());
            }
            None => self.dropped += 1,
        }
    }
}

fn is_navigational(href: &str) -> bool {
    let href = href.trim_start();
    if href.starts_with('#') {
        return false;
    }
    let lowered = href
        .get(..href.len().min(16))
        .unwrap_or(href)
        .to_ascii_lowercase();
    !NON_NAVIGATIONAL_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
}

struct OpenElement {
    name: String,
    matched: bool,
}

/// 选择器片段处理器
///
/// `open` 记录未闭合元素，`active` 记录当前处于打开状态的片段下标。
/// 文本总是追加到最内层的活动片段；元素闭合时弹出其上所有未闭合元素。
struct SelectorHandler {
    selector: Selector,
    open: Vec<OpenElement>,
    active: Vec<usize>,
    fragments: Vec<ExtractedElement>,
}

impl SelectorHandler {
    fn new(selector: Selector) -> Self {
        Self {
            selector,
            open: Vec::new(),
            active: Vec::new(),
            fragments: Vec::new(),
        }
    }

    fn start(&mut self, tag: &Tag) {
        let name = tag.name.to_string();
        let matched = self.selector.matches(attr(tag, "class"), attr(tag, "id"));

        if matched {
            let attrs = tag
                .attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            self.fragments.push(ExtractedElement {
                tag: name.clone(),
                attrs,
                inner_text: String::new(),
            });
        }

        if is_void(&name) {
            return;
        }
        if !matched && self.open.len() >= MAX_TRACKED_DEPTH {
            return;
        }
        if matched {
            self.active.push(self.fragments.len() - 1);
        }
        self.open.push(OpenElement { name, matched });
    }

    fn end(&mut self, name: &str) {
        let Some(pos) = self.open.iter().rposition(|e| e.name == name) else {
            // Stray end tag
            return;
        };
        for element in self.open.drain(pos..) {
            if element.matched {
                self.active.pop();
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(&idx) = self.active.last() {
            self.fragments[idx].inner_text.push_str(text);
        }
    }

    fn finish(&mut self) -> Vec<ExtractedElement> {
        self.open.clear();
        self.active.clear();
        std::mem::take(&mut self.fragments)
            .into_iter()
            .map(|mut fragment| {
                fragment.inner_text = collapse_whitespace(&fragment.inner_text);
                fragment
            })
            .collect()
    }
}

/// 所有处理器的集合，一次解析中同时生效
struct Handlers {
    base: Url,
    title: TitleHandler,
    meta: MetaHandler,
    images: UrlCollector,
    links: UrlCollector,
    videos: UrlCollector,
    selector: Option<SelectorHandler>,
    parse_errors: usize,
}

impl Handlers {
    fn new(base: Url, selector: Option<Selector>) -> Self {
        let document = ExtractedDocument::default();
        Self {
            base,
            title: TitleHandler::default(),
            meta: MetaHandler::default(),
            images: UrlCollector::new(document.images),
            links: UrlCollector::new(document.links),
            videos: UrlCollector::new(document.videos),
            selector: selector.map(SelectorHandler::new),
            parse_errors: 0,
        }
    }

    fn start_tag(&mut self, tag: &Tag) {
        match &*tag.name {
            "title" => self.title.start(),
            "meta" => self.meta.element(tag),
            "img" => {
                if let Some(src) = non_empty_attr(tag, "src") {
                    self.images.collect(&self.base, src);
                }
            }
            "a" => {
                if let Some(href) = non_empty_attr(tag, "href").filter(|h| is_navigational(h)) {
                    self.links.collect(&self.base, href);
                }
            }
            "video" | "source" => {
                if let Some(src) =
                    non_empty_attr(tag, "src").or_else(|| non_empty_attr(tag, "data-src"))
                {
                    self.videos.collect(&self.base, src);
                }
            }
            _ => {}
        }

        if let Some(selector) = self.selector.as_mut() {
            selector.start(tag);
        }
    }

    fn end_tag(&mut self, name: &str) {
        if name == "title" {
            self.title.end();
        }
        if let Some(selector) = self.selector.as_mut() {
            selector.end(name);
        }
    }

    fn text(&mut self, text: &str) {
        self.title.text(text);
        if let Some(selector) = self.selector.as_mut() {
            selector.text(text);
        }
    }

    fn finish(&mut self) -> ExtractedDocument {
        let dropped = self.images.dropped + self.links.dropped + self.videos.dropped;
        if dropped > 0 || self.parse_errors > 0 {
            debug!(
                "提取完成: 丢弃 {} 个无法解析的引用, {} 个解析错误",
                dropped, self.parse_errors
            );
        }

        let empty = ExtractedDocument::default();
        ExtractedDocument {
            title: collapse_whitespace(&self.title.text),
            meta: std::mem::take(&mut self.meta.meta),
            images: std::mem::replace(&mut self.images.set, empty.images),
            links: std::mem::replace(&mut self.links.set, empty.links),
            videos: std::mem::replace(&mut self.videos.set, empty.videos),
            fragments: self
                .selector
                .as_mut()
                .map(SelectorHandler::finish)
                .unwrap_or_default(),
        }
    }
}

/// 分词器事件接收端
struct ExtractionSink {
    handlers: RefCell<Handlers>,
}

/// 需要切换分词状态的元素，与 HTML 树构建器的行为一致
fn raw_kind_for(name: &str) -> Option<TokenSinkResult<()>> {
    match name {
        "title" | "textarea" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}

impl TokenSink for ExtractionSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut handlers = self.handlers.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    handlers.start_tag(&tag);
                    if let Some(result) = raw_kind_for(&tag.name) {
                        return result;
                    }
                }
                TagKind::EndTag => handlers.end_tag(&tag.name),
            },
            Token::CharacterTokens(text) => handlers.text(&text),
            Token::ParseError(_) => handlers.parse_errors += 1,
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// 流式提取器
///
/// 可以多次 `feed` 文本块，最后调用 `finish` 得到结果
pub struct StreamingExtractor {
    tokenizer: Tokenizer<ExtractionSink>,
    input: BufferQueue,
}

impl StreamingExtractor {
    pub fn new(base: Url, selector: Option<Selector>) -> Self {
        let sink = ExtractionSink {
            handlers: RefCell::new(Handlers::new(base, selector)),
        };
        Self {
            tokenizer: Tokenizer::new(sink, TokenizerOpts::default()),
            input: BufferQueue::default(),
        }
    }

    /// 输入下一段文本
    pub fn feed(&self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.input.push_back(StrTendril::from_slice(chunk));
        let _ = self.tokenizer.feed(&self.input);
    }

    /// 结束输入并返回提取结果
    pub fn finish(self) -> ExtractedDocument {
        let _ = self.tokenizer.feed(&self.input);
        self.tokenizer.end();
        let document = self.tokenizer.sink.handlers.borrow_mut().finish();
        document
    }
}

/// 提取服务
///
/// 负责从 HTML 内容中一次性提取标题、meta、媒体地址、链接与选择器片段
pub struct ExtractionService;

impl ExtractionService {
    /// 对完整文档执行一次流式提取
    pub fn extract(html: &str, base: &Url, selector: Option<&Selector>) -> ExtractedDocument {
        let extractor = StreamingExtractor::new(base.clone(), selector.cloned());
        extractor.feed(html);
        extractor.finish()
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
