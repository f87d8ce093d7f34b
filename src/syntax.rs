use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
	Plain,
	Keyword,
	String,
	Comment,
	Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan<'a> {
	pub text:  &'a str,
	pub style: SpanStyle,
}

pub trait Highlighter {
	fn highlight<'a>(
		&'a self,
		line: &'a str,
		language: Option<&str>,
	) -> Box<dyn Iterator<Item = StyledSpan<'a>> + 'a>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
	fn highlight<'a>(
		&'a self,
		line: &'a str,
		_language: Option<&str>,
	) -> Box<dyn Iterator<Item = StyledSpan<'a>> + 'a> {
		Box::new((!line.is_empty()).then_some(StyledSpan { text: line, style: SpanStyle::Plain }).into_iter())
	}
}

pub const LANGUAGES: [&str; 15] = [
	"rust",
	"python",
	"javascript",
	"typescript",
	"c",
	"cpp",
	"go",
	"java",
	"sh",
	"toml",
	"json",
	"yaml",
	"markdown",
	"html",
	"css",
];

pub fn language_by_name(name: &str) -> Option<&'static str> {
	let name = name.trim().to_ascii_lowercase();
	LANGUAGES.into_iter().find(|language| *language == name)
}

pub fn detect_language(path: &Path) -> Option<&'static str> {
	let extension = path.extension()?.to_str()?.to_ascii_lowercase();
	let language = match extension.as_str() {
		"rs" => "rust",
		"py" | "pyw" => "python",
		"js" | "mjs" | "cjs" => "javascript",
		"ts" => "typescript",
		"c" | "h" => "c",
		"cc" | "cpp" | "cxx" | "hpp" => "cpp",
		"go" => "go",
		"java" => "java",
		"sh" | "bash" => "sh",
		"toml" => "toml",
		"json" => "json",
		"yaml" | "yml" => "yaml",
		"md" | "markdown" => "markdown",
		"html" | "htm" => "html",
		"css" => "css",
		_ => return None,
	};
	Some(language)
}
