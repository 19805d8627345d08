// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};

/// 图片集合上限
pub const IMAGE_CAP: usize = 50;
/// 链接集合上限
pub const LINK_CAP: usize = 100;

/// 按插入顺序去重、带上限的URL集合
///
/// 达到上限后新的条目被静默丢弃
#[derive(Debug, Clone, Default)]
pub struct OrderedUrlSet {
    seen: HashSet<String>,
    items: Vec<String>,
    cap: Option<usize>,
}

impl OrderedUrlSet {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: Some(cap),
            ..Self::default()
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 插入一个URL，返回是否真正加入了集合
    pub fn insert(&mut self, url: String) -> bool {
        if self.is_full() || self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.items.push(url);
        true
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.items.len() >= cap)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Serialize for OrderedUrlSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// 选择器命中的单个元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedElement {
    /// 标签名（小写）
    pub tag: String,
    /// 元素的完整属性表
    pub attrs: BTreeMap<String, String>,
    /// 元素内的文本（含后代），结束时做空白归一化
    #[serde(rename = "innerText")]
    pub inner_text: String,
}

/// 单次流式解析的产物
///
/// 只在一个请求内存在，组装响应后即被丢弃
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub title: String,
    pub meta: BTreeMap<String, String>,
    pub images: OrderedUrlSet,
    pub links: OrderedUrlSet,
    pub videos: OrderedUrlSet,
    pub fragments: Vec<ExtractedElement>,
}

impl Default for ExtractedDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            meta: BTreeMap::new(),
            images: OrderedUrlSet::with_cap(IMAGE_CAP),
            links: OrderedUrlSet::with_cap(LINK_CAP),
            videos: OrderedUrlSet::unbounded(),
            fragments: Vec::new(),
        }
    }
}
