//! Static reference of export keywords accepted by the Tool

/// Resource URI for `read_resource`
pub const EXPORT_REFERENCE_URI: &str = "seospider://export-reference";

/// Every `--export-tabs`, `--bulk-export` and `--save-report` keyword
pub const EXPORT_REFERENCE: &str = r#"# SEO Spider Export Reference

## --export-tabs (Tab:Filter)
Export data from the main crawl tabs. Format: "Tab:Filter" comma-separated.

### Tabs and Filters:
- Internal: All, HTML, JavaScript, CSS, Images, PDF, Flash, Other, Unknown
- External: All, HTML, JavaScript, CSS, Images, PDF, Flash, Other, Unknown
- Protocol: All, HTTP URLs, HTTPS URLs, HTTP Images, HTTPS Images
- Response Codes: All, Blocked by Robots.txt, Blocked by User, No Response, 1xx, 2xx, 3xx, 4xx, 5xx
- URL: All, Non ASCII Characters, Underscores, Uppercase, Parameters, Duplicate URLs, Over 115 Characters
- Page Titles: All, Missing, Duplicate, Over 60 Characters, Below 30 Characters, Over 560 Pixels, Below 200 Pixels, Same as H1, Multiple
- Meta Description: All, Missing, Duplicate, Over 155 Characters, Below 70 Characters, Over 990 Pixels, Below 400 Pixels, Multiple
- Meta Keywords: All, Missing, Duplicate
- H1: All, Missing, Duplicate, Over 70 Characters, Multiple
- H2: All, Missing, Duplicate, Over 70 Characters, Multiple
- Images: All, Over 100 KB, Missing Alt Text, Missing Alt Attribute, Alt Text Over 100 Characters
- Canonicals: All, Contains Canonical, Self Referencing, Canonicalised, Missing, Multiple
- Pagination: All, Contains Pagination, First Page, Paginated 2+, Paginated with rel=noindex
- Directives: All, Index, Noindex, Follow, Nofollow, None, NoArchive, NoSnippet, Max-Snippet, Max-Image-Preview, Max-Video-Preview, NoODP, NoYDir, NoTranslate, Unavailable After, Refresh
- Hreflang: All, Contains Hreflang, Non 200 Hreflang URLs, Unlinked Hreflang URLs, Missing Return Links, Inconsistent Language & Region, Non Canonical, Noindex
- JavaScript: All, Frameworks & Libraries, JavaScript Files, Missing, Async, Defer, Async & Defer
- Structured Data: All, Contains Structured Data, Missing, Validation Errors, Validation Warnings, Schema.org, JSON-LD, Microdata, RDFa
- Sitemaps: All, URLs in Sitemap, URLs Not in Sitemap, Orphan URLs
- AMP: All, AMP, Non AMP, Missing Non AMP
- Content: All, Near Duplicates, Exact Duplicates
- Security: All, HTTP URLs, Mixed Content, Form URL Insecure, Form on HTTP URL
- Spelling & Grammar: All, Spelling Errors, Grammar Errors

## --bulk-export (Type)
Export large datasets. Comma-separated list of export names (no Category: prefix).
Example: --bulk-export "All Inlinks,All Outlinks"

Available exports:
- All Links
- All Inlinks
- All Outlinks
- All Anchor Text
- Response Times
- Cookies
- Unique Content
- Near Duplicates
- Exact Duplicates
- Contains
- Does Not Contain
- Canonicals
- Hreflang
- All Image Inlinks
- All Image Outlinks
- Missing Alt Tags
- Alt Text Over 100
- JavaScript Links
- JavaScript Rendering
- All Redirect Chains
- HTTP Headers
- All Sitemap URLs
- All Structured Data
- Validation Errors
- Validation Warnings
- Accessibility Issues
- External Links

## --save-report (Report)
Save summary reports. Comma-separated.

- Crawl Overview
- Redirect Chains
- Redirect & Canonical Chains
- Insecure Content
- SERP Summary
- PageSpeed Summary
"#;
