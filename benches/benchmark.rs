// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 性能基准测试套件
//!
//! 衡量单遍流式提取在不同文档规模与输入分块方式下的吞吐

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fluxgate::domain::models::extraction_request::Selector;
use fluxgate::domain::services::extraction_service::{ExtractionService, StreamingExtractor};
use fluxgate::domain::services::text_service::strip_to_text;
use std::hint::black_box;
use url::Url;

/// 生成包含指定数量区块的测试文档
fn build_document(sections: usize) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><title>Benchmark Page</title>\
         <meta name=\"description\" content=\"bench\"></head><body>",
    );
    for i in 0..sections {
        html.push_str(&format!(
            "<section class=\"item\" id=\"s{i}\"><h2>Section {i}</h2>\
             <p>Paragraph <b>{i}</b> with <a href=\"/page/{i}\">a link</a> \
             and <img src=\"/img/{i}.png\" alt=\"\">.</p>\
             <script>var x = \"<div class='item'>{i}</div>\";</script></section>"
        ));
    }
    html.push_str("</body></html>");
    html
}

/// 基准测试：整篇文档一次输入
fn benchmark_single_pass(c: &mut Criterion) {
    let base = Url::parse("https://example.com/").unwrap();
    let selector = Selector::Class("item".to_string());

    let mut group = c.benchmark_group("single_pass_extraction");
    for sections in [10usize, 100, 1000] {
        let html = build_document(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));

        group.bench_with_input(BenchmarkId::new("summary", sections), &html, |b, html| {
            b.iter(|| ExtractionService::extract(black_box(html), &base, None))
        });
        group.bench_with_input(BenchmarkId::new("with_selector", sections), &html, |b, html| {
            b.iter(|| ExtractionService::extract(black_box(html), &base, Some(&selector)))
        });
    }
    group.finish();
}

/// 基准测试：按网络分块大小逐段输入
fn benchmark_chunked_feed(c: &mut Criterion) {
    let base = Url::parse("https://example.com/").unwrap();
    let html = build_document(500);

    let mut group = c.benchmark_group("chunked_extraction");
    group.throughput(Throughput::Bytes(html.len() as u64));
    for chunk_size in [512usize, 4096, 16384] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let extractor = StreamingExtractor::new(base.clone(), None);
                    let mut rest = html.as_str();
                    while !rest.is_empty() {
                        let mut end = chunk_size.min(rest.len());
                        while !rest.is_char_boundary(end) {
                            end += 1;
                        }
                        let (chunk, tail) = rest.split_at(end);
                        extractor.feed(chunk);
                        rest = tail;
                    }
                    black_box(extractor.finish())
                })
            },
        );
    }
    group.finish();
}

/// 基准测试：text 格式的标签剥离
fn benchmark_strip_to_text(c: &mut Criterion) {
    let html = build_document(500);
    c.bench_function("strip_to_text", |b| b.iter(|| strip_to_text(black_box(&html))));
}

criterion_group!(
    benches,
    benchmark_single_pass,
    benchmark_chunked_feed,
    benchmark_strip_to_text
);
criterion_main!(benches);
