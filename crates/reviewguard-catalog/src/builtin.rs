//! The built-in rule table.
//!
//! This is data, not logic: a normalized, deduplicated rendering of the
//! review checklist, keyed by rule id and grouped by category. Severity
//! and detection mode (mechanical pattern vs. derived metric) are fixed
//! per rule; the decision thresholds live in `ReviewPolicy`, not here.

use reviewguard_types::{Category, MetricSpec, RuleConfig, RuleScope, Severity};

use Category::*;
use Severity::*;

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A diff-line pattern rule with no path restrictions.
fn line(id: &str, category: Category, severity: Severity, message: &str, patterns: &[&str]) -> RuleConfig {
    RuleConfig {
        id: id.to_string(),
        category,
        severity,
        scope: RuleScope::DiffLine,
        message: message.to_string(),
        patterns: strs(patterns),
        allow_patterns: vec![],
        paths: vec![],
        exclude_paths: vec![],
        metric: None,
        help: None,
    }
}

/// A description-text pattern rule.
fn desc(id: &str, category: Category, severity: Severity, message: &str, patterns: &[&str]) -> RuleConfig {
    RuleConfig {
        scope: RuleScope::DescriptionText,
        ..line(id, category, severity, message, patterns)
    }
}

/// An added-line-count metric rule. Severity escalates from Warning to
/// Critical when the upper threshold is crossed.
fn size(id: &str, category: Category, message: &str, warn_above: u32, critical_above: u32, paths: &[&str]) -> RuleConfig {
    RuleConfig {
        id: id.to_string(),
        category,
        severity: Warning,
        scope: RuleScope::FileMetric,
        message: message.to_string(),
        patterns: vec![],
        allow_patterns: vec![],
        paths: strs(paths),
        exclude_paths: vec![],
        metric: Some(MetricSpec::AddedLines {
            warn_above,
            critical_above,
        }),
        help: None,
    }
}

trait Refine {
    fn allow(self, patterns: &[&str]) -> Self;
    fn only(self, globs: &[&str]) -> Self;
    fn except(self, globs: &[&str]) -> Self;
    fn hint(self, text: &str) -> Self;
}

impl Refine for RuleConfig {
    fn allow(mut self, patterns: &[&str]) -> Self {
        self.allow_patterns = strs(patterns);
        self
    }
    fn only(mut self, globs: &[&str]) -> Self {
        self.paths = strs(globs);
        self
    }
    fn except(mut self, globs: &[&str]) -> Self {
        self.exclude_paths = strs(globs);
        self
    }
    fn hint(mut self, text: &str) -> Self {
        self.help = Some(text.to_string());
        self
    }
}

const SCRIPT_FILES: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"];
const COMPONENT_FILES: &[&str] = &["**/*.tsx", "**/*.jsx"];
const TYPESCRIPT_FILES: &[&str] = &["**/*.ts", "**/*.tsx"];
const STYLE_FILES: &[&str] = &["**/*.css", "**/*.scss", "**/*.less"];
const TEST_FILES: &[&str] = &[
    "**/*.test.*",
    "**/*.spec.*",
    "**/__tests__/**",
    "**/tests/**",
];
const NOT_TEST_FILES: &[&str] = &["**/*.test.*", "**/*.spec.*", "**/__tests__/**"];

/// Patterns that identify credential material. Kept in a single rule per
/// scope so one leaked value on one line yields exactly one finding.
const SECRET_PATTERNS: &[&str] = &[
    r#"(?i)(api[_-]?key|apikey|client[_-]?secret|secret[_-]?key|auth[_-]?token|access[_-]?token|password|passwd)\s*[:=]\s*['"][^'"]{8,}['"]"#,
    r"(sk|rk|pk)_live_[0-9a-zA-Z]{4,}",
    r"AKIA[0-9A-Z]{16}",
    r"(ghp_|gho_|ghu_|ghs_|ghr_)[A-Za-z0-9]{20,}",
    r"xox[baprs]-[0-9A-Za-z-]{10,}",
    r"AIza[0-9A-Za-z_-]{35}",
    r"eyJ[A-Za-z0-9_-]{10,}\.eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}",
    r"-----BEGIN (RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----",
];

/// Environment-variable accessors that make a matched line acceptable.
const ENV_ACCESSOR_ALLOW: &[&str] = &[r"process\.env\.", r"import\.meta\.env\."];

pub fn builtin_rules() -> Vec<RuleConfig> {
    let mut rules = Vec::with_capacity(128);

    rules.extend(lint_rules());
    rules.extend(types_rules());
    rules.extend(structure_rules());
    rules.extend(hooks_rules());
    rules.extend(performance_rules());
    rules.extend(state_rules());
    rules.extend(data_fetching_rules());
    rules.extend(styling_rules());
    rules.extend(routing_rules());
    rules.extend(security_rules());
    rules.extend(accessibility_rules());
    rules.extend(testing_rules());
    rules.extend(build_rules());

    rules
}

fn lint_rules() -> Vec<RuleConfig> {
    vec![
        line("lint.no_console", Lint, Warning, "Remove console output before merging.",
            &[r"\bconsole\.(log|debug|info|trace|table)\s*\("])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES)
            .hint("Use the project logger; console output is stripped inconsistently across bundlers."),
        line("lint.no_debugger", Lint, Critical, "Remove debugger statements before merging.",
            &[r"\bdebugger\b"])
            .only(SCRIPT_FILES),
        line("lint.no_alert", Lint, Warning, "Replace alert/confirm/prompt with UI components.",
            &[r"\b(alert|confirm|prompt)\s*\("])
            .only(COMPONENT_FILES),
        line("lint.no_var", Lint, Warning, "Use let or const instead of var.",
            &[r"\bvar\s+[A-Za-z_$]"])
            .only(SCRIPT_FILES),
        line("lint.loose_equality", Lint, Warning, "Use strict equality (=== / !==).",
            &[r"[^=!<>]==[^=]", r"[^!]!=[^=]"])
            .only(SCRIPT_FILES),
        line("lint.todo_comment", Lint, Info, "Track TODO/FIXME/HACK comments in an issue.",
            &[r"\b(TODO|FIXME|HACK)\b"]),
        line("lint.eslint_disable", Lint, Warning, "Avoid blanket eslint-disable directives.",
            &[r"eslint-disable(?:-next-line|-line)?"])
            .allow(&[r"eslint-disable[^ ]* +[a-z@]"])
            .hint("Disable a named rule on a single line, with a comment explaining why."),
        line("lint.empty_catch", Lint, Warning, "Do not swallow exceptions with an empty catch.",
            &[r"catch\s*(\([^)]*\))?\s*\{\s*\}"])
            .only(SCRIPT_FILES),
        line("lint.commented_out_code", Lint, Info, "Delete commented-out code instead of keeping it.",
            &[r"^\s*//\s*(const |let |function |import |return |if\s*\()"])
            .only(SCRIPT_FILES),
        line("lint.no_new_function", Lint, Warning, "Avoid dynamic function construction.",
            &[r"\bnew\s+Function\s*\("])
            .only(SCRIPT_FILES),
        line("lint.nested_ternary", Lint, Info, "Nested ternaries are hard to read; extract a function.",
            &[r"\?[^:?]*\?[^:]*:"])
            .only(SCRIPT_FILES),
        line("lint.no_with", Lint, Warning, "The with statement is banned in strict mode.",
            &[r"\bwith\s*\("])
            .only(SCRIPT_FILES),
        line("lint.no_arguments_object", Lint, Info, "Use rest parameters instead of the arguments object.",
            &[r"\barguments\s*\["])
            .only(SCRIPT_FILES),
    ]
}

fn types_rules() -> Vec<RuleConfig> {
    vec![
        line("types.no_any", Types, Warning, "Avoid the any type; model the shape explicitly.",
            &[r":\s*any\b", r"<any[,>]", r"\bas\s+any\b"])
            .only(TYPESCRIPT_FILES)
            .except(NOT_TEST_FILES)
            .hint("Prefer unknown plus narrowing, or a real interface for the value."),
        line("types.no_ts_suppression", Types, Warning, "Do not suppress the type checker.",
            &[r"@ts-ignore", r"@ts-nocheck"])
            .only(TYPESCRIPT_FILES)
            .allow(&[r"@ts-expect-error"]),
        line("types.no_non_null_assertion", Types, Warning, "Avoid non-null assertions; handle the null case.",
            &[r"\w!\.", r"\w!\)"])
            .only(TYPESCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("types.no_object_function_types", Types, Warning, "Avoid Object/Function as types.",
            &[r":\s*Object\b", r":\s*Function\b"])
            .only(TYPESCRIPT_FILES),
        line("types.no_any_in_catch", Types, Info, "Type caught errors as unknown, not any.",
            &[r"catch\s*\(\s*\w+\s*:\s*any\s*\)"])
            .only(TYPESCRIPT_FILES),
        line("types.no_const_enum", Types, Info, "Avoid const enum; it breaks isolated module builds.",
            &[r"\bconst\s+enum\b"])
            .only(TYPESCRIPT_FILES),
        line("types.exported_fn_return_type", Types, Info, "Annotate return types on exported functions.",
            &[r"export\s+(async\s+)?function\s+\w+\s*\([^)]*\)\s*\{"])
            .only(TYPESCRIPT_FILES)
            .allow(&[r"\)\s*:\s*[A-Za-z]"]),
        line("types.no_double_assertion", Types, Warning, "Avoid as-unknown-as double assertions.",
            &[r"\bas\s+unknown\s+as\b"])
            .only(TYPESCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("types.prefer_union_over_enum", Types, Info, "Prefer string-literal unions over enums.",
            &[r"^\s*(export\s+)?enum\s+[A-Z]"])
            .only(TYPESCRIPT_FILES),
        line("types.angle_bracket_assertion", Types, Info, "Use the as syntax for assertions; angle brackets clash with JSX.",
            &[r"=\s*<[A-Z]\w+>\s*\w"])
            .only(&["**/*.ts"]),
        line("types.empty_interface", Types, Info, "An empty interface constrains nothing; delete or fill it.",
            &[r"interface\s+\w+\s*\{\s*\}"])
            .only(TYPESCRIPT_FILES),
    ]
}

fn structure_rules() -> Vec<RuleConfig> {
    vec![
        size("structure.component_size", Structure,
            "Component file exceeds the added-line budget; split it up.",
            200, 300, COMPONENT_FILES),
        size("structure.module_size", Structure,
            "Module exceeds the added-line budget; split it up.",
            400, 600, &["**/*.ts", "**/*.js"]),
        line("structure.deep_relative_import", Structure, Warning,
            "Deep relative imports couple distant modules; use a path alias.",
            &[r#"from\s+['"](\.\./){3,}"#])
            .only(SCRIPT_FILES),
        line("structure.barrel_reexport_all", Structure, Info,
            "Wildcard re-exports hide the public surface of a module.",
            &[r#"export\s+\*\s+from"#])
            .only(SCRIPT_FILES),
        line("structure.import_from_index_sibling", Structure, Info,
            "Import the concrete module, not the sibling barrel.",
            &[r#"from\s+['"]\./index['"]"#])
            .only(SCRIPT_FILES),
        line("structure.absolute_src_import", Structure, Warning,
            "Do not import via the src/ root; use the configured alias.",
            &[r#"from\s+['"]src/"#])
            .only(SCRIPT_FILES),
        line("structure.default_export_in_index", Structure, Info,
            "Barrels should re-export named symbols, not define defaults.",
            &[r"export\s+default\b"])
            .only(&["**/index.ts", "**/index.tsx"]),
        line("structure.nested_component_definition", Structure, Warning,
            "Do not define a component inside another component's body.",
            &[r"=>\s*\{\s*(const|function)\s+[A-Z]\w*\s*="])
            .only(COMPONENT_FILES),
        line("structure.require_in_module", Structure, Info,
            "Use ES module imports instead of require.",
            &[r"=\s*require\s*\("])
            .only(TYPESCRIPT_FILES),
        line("structure.anonymous_default_export", Structure, Info,
            "Name default exports so stack traces and devtools stay readable.",
            &[r"export\s+default\s+(function\s*\(|\(|class\s*\{)"])
            .only(SCRIPT_FILES),
    ]
}

fn hooks_rules() -> Vec<RuleConfig> {
    vec![
        line("hooks.no_conditional_hook", Hooks, Critical,
            "Hooks must not be called conditionally.",
            &[r"if\s*\([^)]*\)\s*\{?\s*use[A-Z]\w*\s*\("])
            .only(COMPONENT_FILES),
        line("hooks.no_hook_in_loop", Hooks, Critical,
            "Hooks must not be called inside loops.",
            &[r"\b(for|while)\s*\([^)]*\)\s*\{?\s*use[A-Z]\w*\s*\("])
            .only(COMPONENT_FILES),
        line("hooks.no_async_effect", Hooks, Warning,
            "useEffect callbacks must not be async; wrap the async work inside.",
            &[r"useEffect\(\s*async"])
            .only(COMPONENT_FILES),
        line("hooks.effect_deps_hint", Hooks, Info,
            "Effect without a dependency array runs on every render.",
            &[r"useEffect\(\s*\(\s*\)\s*=>\s*\{?\s*$"])
            .only(COMPONENT_FILES),
        line("hooks.no_direct_dom_access", Hooks, Warning,
            "Query the DOM through refs, not document selectors.",
            &[r"document\.(getElementById|querySelector|querySelectorAll)\s*\("])
            .only(COMPONENT_FILES)
            .except(NOT_TEST_FILES),
        line("hooks.interval_needs_cleanup", Hooks, Info,
            "setInterval in a component needs a cleanup function.",
            &[r"\bsetInterval\s*\("])
            .only(COMPONENT_FILES),
        line("hooks.object_state_hint", Hooks, Info,
            "Large object state is easier to manage with useReducer.",
            &[r"useState\(\s*\{"])
            .only(COMPONENT_FILES),
        line("hooks.no_ref_mutation_in_render", Hooks, Warning,
            "Do not write to refs during render.",
            &[r"ref\.current\s*=[^=]"])
            .only(COMPONENT_FILES)
            .allow(&[r"useEffect|useLayoutEffect|useCallback|=>"]),
        line("hooks.no_hook_in_callback", Hooks, Critical,
            "Hooks must not be called from array callbacks.",
            &[r"\.(map|forEach|filter|reduce)\(.*=>.*\buse[A-Z]\w*\s*\("])
            .only(COMPONENT_FILES),
        line("hooks.timeout_needs_cleanup", Hooks, Info,
            "setTimeout in a component needs a cleanup function.",
            &[r"\bsetTimeout\s*\("])
            .only(COMPONENT_FILES)
            .except(NOT_TEST_FILES),
    ]
}

fn performance_rules() -> Vec<RuleConfig> {
    vec![
        line("performance.inline_handler_prop", Performance, Warning,
            "Inline arrow handlers defeat memoized children; hoist or useCallback.",
            &[r"on[A-Z]\w*=\{\s*\([^)]*\)\s*=>"])
            .only(COMPONENT_FILES),
        line("performance.index_as_key", Performance, Warning,
            "Array index keys break reconciliation on reorder.",
            &[r"key=\{\s*(i|idx|index)\s*\}"])
            .only(COMPONENT_FILES),
        line("performance.json_deep_clone", Performance, Warning,
            "JSON round-trip cloning is slow and lossy; use structuredClone.",
            &[r"JSON\.parse\(\s*JSON\.stringify"])
            .only(SCRIPT_FILES),
        line("performance.lodash_full_import", Performance, Warning,
            "Import the lodash submodule to keep the bundle small.",
            &[r#"from\s+['"]lodash['"]"#])
            .only(SCRIPT_FILES),
        line("performance.moment_import", Performance, Info,
            "moment is deprecated and heavy; prefer date-fns or dayjs.",
            &[r#"from\s+['"]moment['"]"#])
            .only(SCRIPT_FILES),
        line("performance.props_spread", Performance, Info,
            "Spreading unknown props forwards more than the child needs.",
            &[r"<[A-Z]\w*\s+\{\.\.\."])
            .only(COMPONENT_FILES),
        line("performance.img_without_lazy", Performance, Info,
            "Below-the-fold images should be lazy loaded.",
            &[r"<img\s"])
            .only(COMPONENT_FILES)
            .allow(&[r"loading="]),
        line("performance.namespace_import", Performance, Info,
            "Namespace imports defeat tree shaking; import the named symbols.",
            &[r"import\s+\*\s+as\s+\w+\s+from"])
            .only(SCRIPT_FILES),
        line("performance.sync_fs_call", Performance, Warning,
            "Synchronous filesystem calls block the event loop.",
            &[r"\b(readFileSync|writeFileSync|appendFileSync|existsSync)\s*\("])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("performance.unkeyed_list_item", Performance, Info,
            "List items rendered from map need a stable key.",
            &[r"\.map\(.*=>\s*\(?\s*<[A-Za-z]"])
            .only(COMPONENT_FILES)
            .allow(&[r"key="]),
        line("performance.document_write", Performance, Warning,
            "document.write blocks parsing and clobbers the document.",
            &[r"document\.write(ln)?\s*\("])
            .only(SCRIPT_FILES),
    ]
}

fn state_rules() -> Vec<RuleConfig> {
    vec![
        line("state.no_state_mutation", State, Critical,
            "Never mutate React state directly.",
            &[r"this\.state\.\w+\s*=[^=]", r"\bstate\.\w+\s*=[^=]"])
            .only(COMPONENT_FILES)
            .allow(&[r"useState|initialState|draft\."]),
        line("state.no_prop_mutation", State, Critical,
            "Props are read-only.",
            &[r"\bprops\.\w+\s*=[^=]"])
            .only(COMPONENT_FILES),
        line("state.store_import_in_component", State, Warning,
            "Components should consume the store via hooks, not import it directly.",
            &[r#"from\s+['"][^'"]*/store['"]"#])
            .only(&["**/components/**"]),
        line("state.no_exported_let", State, Warning,
            "Exported mutable bindings are hidden global state.",
            &[r"^\s*export\s+let\b"])
            .only(SCRIPT_FILES),
        line("state.set_state_from_previous", State, Warning,
            "Derive next state from the updater callback, not this.state.",
            &[r"setState\(\s*\{[^}]*this\.state"])
            .only(COMPONENT_FILES),
        line("state.no_window_global", State, Warning,
            "Do not stash state on window.",
            &[r"window\.\w+\s*=[^=]"])
            .only(SCRIPT_FILES)
            .allow(&[r"window\.(location|onerror|name)\b"]),
        line("state.use_state_setter_naming", State, Info,
            "Name useState setters setX for readability.",
            &[r"const\s+\[\w+,\s*\w+\]\s*=\s*useState"])
            .only(COMPONENT_FILES)
            .allow(&[r",\s*set[A-Z]"]),
        line("state.local_storage_as_state", State, Info,
            "Reading localStorage during render bypasses the state model.",
            &[r"localStorage\.getItem\("])
            .only(COMPONENT_FILES),
        line("state.no_collection_mutation", State, Critical,
            "Mutating arrays or objects held in state skips re-render.",
            &[r"(state|props)\.\w+\.(push|pop|splice|shift|unshift|sort|reverse)\s*\("])
            .only(COMPONENT_FILES),
        line("state.context_value_literal", State, Warning,
            "An inline context value re-renders every consumer; memoize it.",
            &[r"value=\{\{"])
            .only(COMPONENT_FILES),
    ]
}

fn data_fetching_rules() -> Vec<RuleConfig> {
    vec![
        line("data_fetching.hardcoded_api_url", DataFetching, Warning,
            "API base URLs belong in configuration, not call sites.",
            &[r#"(fetch|axios\.(get|post|put|patch|delete))\(\s*['"]https?://"#])
            .only(SCRIPT_FILES)
            .allow(&[r"localhost|127\.0\.0\.1"])
            .except(NOT_TEST_FILES),
        line("data_fetching.then_chain", DataFetching, Info,
            "Prefer async/await over long then chains.",
            &[r"\.then\([^)]*\)\s*\.then\("])
            .only(SCRIPT_FILES),
        line("data_fetching.empty_catch_handler", DataFetching, Warning,
            "Do not discard fetch failures with an empty catch handler.",
            &[r"\.catch\(\s*\(\s*\w*\s*\)\s*=>\s*\{\s*\}\s*\)"])
            .only(SCRIPT_FILES),
        line("data_fetching.sync_xhr", DataFetching, Critical,
            "Synchronous XHR blocks the main thread.",
            &[r"\.open\([^)]*,\s*false\s*\)"])
            .only(SCRIPT_FILES),
        line("data_fetching.sub_second_polling", DataFetching, Warning,
            "Sub-second polling hammers the backend; use a push channel or backoff.",
            &[r"setInterval\([^,]*,\s*[0-9]{1,3}\s*\)"])
            .only(SCRIPT_FILES),
        line("data_fetching.fetch_in_render_body", DataFetching, Warning,
            "Fetch from an effect or data hook, not the render body.",
            &[r"^\s*(const|let)\s+\w+\s*=\s*fetch\("])
            .only(COMPONENT_FILES)
            .allow(&[r"await|useEffect|\.then"]),
        line("data_fetching.credentials_include", DataFetching, Info,
            "credentials: 'include' sends cookies cross-origin; confirm CORS policy.",
            &[r#"credentials:\s*['"]include['"]"#])
            .only(SCRIPT_FILES),
        line("data_fetching.await_in_loop", DataFetching, Info,
            "Sequential awaits in a loop serialize requests; batch with Promise.all.",
            &[r"(for|while)\s*\([^{]*\)\s*\{?\s*await\b"])
            .only(SCRIPT_FILES),
        line("data_fetching.api_key_in_query", DataFetching, Warning,
            "Keys in query strings leak through logs and referrers; send them in headers.",
            &[r"[?&](api_?key|apikey|access_token|token)="])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("data_fetching.hardcoded_websocket_url", DataFetching, Info,
            "WebSocket endpoints belong in configuration.",
            &[r#"new\s+WebSocket\(\s*['"]wss?://"#])
            .only(SCRIPT_FILES)
            .allow(&[r"localhost|127\.0\.0\.1"]),
    ]
}

fn styling_rules() -> Vec<RuleConfig> {
    vec![
        line("styling.inline_style_object", Styling, Warning,
            "Inline style objects are recreated every render; use classes or styled components.",
            &[r"style=\{\{"])
            .only(COMPONENT_FILES),
        line("styling.important_flag", Styling, Warning,
            "!important hides specificity problems.",
            &[r"!important"])
            .only(STYLE_FILES),
        line("styling.px_font_size", Styling, Info,
            "Use rem for font sizes so user scaling works.",
            &[r"font-size:\s*\d+px"])
            .only(STYLE_FILES),
        line("styling.hardcoded_color", Styling, Info,
            "Use design-token variables instead of raw hex colors.",
            &[r"#[0-9a-fA-F]{3,8}\b"])
            .only(STYLE_FILES)
            .allow(&[r"var\(--"]),
        line("styling.z_index_escalation", Styling, Warning,
            "Huge z-index values indicate stacking-context escalation.",
            &[r"z-index:\s*(9{3,}|\d{4,})"])
            .only(STYLE_FILES),
        line("styling.global_wildcard_selector", Styling, Info,
            "Global * selectors are expensive and leak across components.",
            &[r"^\s*\*\s*\{"])
            .only(STYLE_FILES),
        line("styling.tag_selector_in_module", Styling, Info,
            "Bare tag selectors in CSS modules style more than this component.",
            &[r"^\s*(div|span|p|a|ul|li)\s*\{"])
            .only(&["**/*.module.css", "**/*.module.scss"]),
        line("styling.vendor_prefix", Styling, Info,
            "Leave vendor prefixes to autoprefixer.",
            &[r"-(webkit|moz|ms|o)-"])
            .only(STYLE_FILES),
        line("styling.id_selector", Styling, Info,
            "Id selectors are unreusable and hard to override; use classes.",
            &[r"^\s*#[A-Za-z][\w-]*\s*[{,]"])
            .only(STYLE_FILES),
        line("styling.deep_nesting", Styling, Info,
            "Deeply nested selectors compile to brittle high-specificity rules.",
            &[r"^\s{16,}\S"])
            .only(&["**/*.scss", "**/*.less"]),
        line("styling.float_layout", Styling, Info,
            "Use flexbox or grid for layout instead of floats.",
            &[r"float:\s*(left|right)"])
            .only(STYLE_FILES),
    ]
}

fn routing_rules() -> Vec<RuleConfig> {
    vec![
        line("routing.window_location_navigation", Routing, Warning,
            "Navigate through the router, not window.location.",
            &[r"window\.location\.(href|assign|replace)\s*[=(]"])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("routing.anchor_for_internal_link", Routing, Warning,
            "Internal links need the router Link, not a raw anchor.",
            &[r#"<a\s+[^>]*href=['"]/"#])
            .only(COMPONENT_FILES),
        line("routing.hardcoded_route_string", Routing, Info,
            "Route paths belong in a shared route table.",
            &[r#"(navigate|push|replace)\(\s*['"]/\w"#])
            .only(SCRIPT_FILES),
        line("routing.full_reload", Routing, Warning,
            "location.reload() drops all client state.",
            &[r"location\.reload\s*\("])
            .only(SCRIPT_FILES),
        line("routing.route_string_concat", Routing, Warning,
            "Build routes with template helpers, not string concatenation.",
            &[r#"(navigate|push)\(\s*['"][^'"]*['"]\s*\+"#])
            .only(SCRIPT_FILES),
        line("routing.unvalidated_redirect", Routing, Critical,
            "Redirect targets taken from request input enable open redirects.",
            &[r"(navigate|redirect|location\.href\s*=)\s*[^;]*(searchParams|location\.search|query\.)"])
            .only(SCRIPT_FILES),
        line("routing.direct_history_manipulation", Routing, Info,
            "Let the router own history; avoid raw pushState.",
            &[r"history\.(pushState|replaceState)\s*\("])
            .only(SCRIPT_FILES),
        line("routing.hash_navigation", Routing, Info,
            "Hash assignment bypasses the router and its guards.",
            &[r"location\.hash\s*=[^=]"])
            .only(SCRIPT_FILES),
        line("routing.manual_document_title", Routing, Info,
            "Set page titles through the route metadata helper, not directly.",
            &[r"document\.title\s*=[^=]"])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("routing.imperative_history_step", Routing, Info,
            "history.back/forward assumes an entry exists; navigate to a route instead.",
            &[r"history\.(back|forward|go)\s*\("])
            .only(SCRIPT_FILES),
    ]
}

fn security_rules() -> Vec<RuleConfig> {
    vec![
        line("security.hardcoded_secret", Security, Critical,
            "Credential material must never be committed; read it from the environment.",
            SECRET_PATTERNS)
            .allow(ENV_ACCESSOR_ALLOW)
            .except(&["**/*.example", "**/*.example.*"])
            .hint("Move the value to environment configuration and rotate the leaked credential."),
        desc("security.credential_in_description", Security, Critical,
            "The PR description contains credential material.",
            SECRET_PATTERNS),
        line("security.no_eval", Security, Critical,
            "eval executes arbitrary code.",
            &[r"\beval\s*\("])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("security.dangerously_set_inner_html", Security, Critical,
            "dangerouslySetInnerHTML without sanitization is an XSS vector.",
            &[r"dangerouslySetInnerHTML"])
            .only(COMPONENT_FILES)
            .allow(&[r"DOMPurify|sanitize"]),
        line("security.inner_html_assignment", Security, Warning,
            "Assigning innerHTML with dynamic content risks XSS.",
            &[r"\.innerHTML\s*=[^=]"])
            .only(SCRIPT_FILES)
            .allow(&[r"DOMPurify|sanitize"]),
        line("security.document_cookie_write", Security, Warning,
            "Raw cookie writes bypass HttpOnly/SameSite policy helpers.",
            &[r"document\.cookie\s*=[^=]"])
            .only(SCRIPT_FILES),
        line("security.insecure_http_url", Security, Warning,
            "Use HTTPS for external endpoints.",
            &[r#"['"]http://"#])
            .only(SCRIPT_FILES)
            .allow(&[r"localhost|127\.0\.0\.1|\.local\b|w3\.org|schemas?\."])
            .except(NOT_TEST_FILES),
        line("security.target_blank_noopener", Security, Warning,
            "target=\"_blank\" links need rel=\"noopener\".",
            &[r#"target=['"]_blank['"]"#])
            .only(COMPONENT_FILES)
            .allow(&[r"noopener|noreferrer"]),
        line("security.tls_verification_disabled", Security, Critical,
            "Never disable TLS certificate verification.",
            &[r"rejectUnauthorized:\s*false", r"NODE_TLS_REJECT_UNAUTHORIZED"])
            .only(SCRIPT_FILES),
        line("security.sql_string_concat", Security, Warning,
            "String-built SQL invites injection; use parameterized queries.",
            &[r#"(?i)\b(select|insert|update|delete)\b[^;]*['"]\s*\+"#])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("security.token_in_local_storage", Security, Warning,
            "Tokens in localStorage are readable by any injected script.",
            &[r#"localStorage\.setItem\(\s*['"](token|jwt|auth|session)"#])
            .only(SCRIPT_FILES),
        line("security.wildcard_post_message", Security, Warning,
            "postMessage with a '*' origin leaks data to any embedder.",
            &[r#"postMessage\([^)]*,\s*['"]\*['"]"#])
            .only(SCRIPT_FILES),
        line("security.basic_auth_in_url", Security, Critical,
            "URLs embedding user:password credentials leak through logs and history.",
            &[r"https?://[^/\s'\x22:]+:[^@\s'\x22]+@"])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("security.weak_random_token", Security, Warning,
            "Math.random is not cryptographically secure; use crypto.randomUUID or getRandomValues.",
            &[r"Math\.random\(\)\.toString\(36\)"])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
        line("security.prototype_pollution", Security, Warning,
            "Touching __proto__ enables prototype pollution.",
            &[r"__proto__"])
            .only(SCRIPT_FILES)
            .except(NOT_TEST_FILES),
    ]
}

fn accessibility_rules() -> Vec<RuleConfig> {
    vec![
        line("accessibility.img_missing_alt", Accessibility, Warning,
            "Images need alt text (empty alt for decorative images).",
            &[r"<img\s"])
            .only(COMPONENT_FILES)
            .allow(&[r"alt="]),
        line("accessibility.click_on_non_interactive", Accessibility, Warning,
            "Click handlers on div/span need a role and keyboard support.",
            &[r"<(div|span)[^>]*onClick"])
            .only(COMPONENT_FILES)
            .allow(&[r"role=|onKeyDown|onKeyUp"]),
        line("accessibility.button_missing_type", Accessibility, Info,
            "Buttons inside forms default to submit; set an explicit type.",
            &[r"<button[\s>]"])
            .only(COMPONENT_FILES)
            .allow(&[r"type="]),
        line("accessibility.autofocus", Accessibility, Info,
            "autoFocus disorients screen-reader and keyboard users.",
            &[r"\bautoFocus\b"])
            .only(COMPONENT_FILES),
        line("accessibility.positive_tabindex", Accessibility, Warning,
            "Positive tabIndex overrides the natural tab order.",
            &[r#"tabIndex=\{?['"]?[1-9]"#])
            .only(COMPONENT_FILES),
        line("accessibility.input_missing_label", Accessibility, Info,
            "Inputs need an associated label or aria-label.",
            &[r"<input\s"])
            .only(COMPONENT_FILES)
            .allow(&[r#"aria-label|aria-labelledby|id=|type=['"]hidden"#]),
        line("accessibility.aria_hidden_interactive", Accessibility, Warning,
            "aria-hidden on interactive elements hides them from assistive tech only.",
            &[r#"aria-hidden=['"]true['"][^>]*(href=|onClick|tabIndex)"#])
            .only(COMPONENT_FILES),
        line("accessibility.media_missing_captions", Accessibility, Info,
            "Video elements need a captions track.",
            &[r"<video[\s>]"])
            .only(COMPONENT_FILES)
            .allow(&[r"<track"]),
        line("accessibility.anchor_missing_href", Accessibility, Info,
            "Anchors without href are invisible to keyboards; use a button.",
            &[r"<a[\s>]"])
            .only(COMPONENT_FILES)
            .allow(&[r"href="]),
        line("accessibility.focus_outline_removed", Accessibility, Warning,
            "Removing the focus outline strands keyboard users; style it instead.",
            &[r"outline:\s*(none|0)\b"])
            .only(STYLE_FILES)
            .allow(&[r"focus-visible"]),
    ]
}

fn testing_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig {
            id: "testing.missing_tests".to_string(),
            category: Testing,
            severity: Info,
            scope: RuleScope::FileMetric,
            message: "New source file has no companion test file in this change-set.".to_string(),
            patterns: vec![],
            allow_patterns: vec![],
            paths: strs(&["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx"]),
            exclude_paths: strs(&[
                "**/*.test.*",
                "**/*.spec.*",
                "**/__tests__/**",
                "**/*.d.ts",
                "**/*.stories.*",
                "**/index.ts",
                "**/index.tsx",
            ]),
            metric: Some(MetricSpec::NewFileWithoutTest),
            help: Some("Add a test next to the file or under __tests__/.".to_string()),
        },
        line("testing.skipped_test", Testing, Warning,
            "Remove or resolve skipped tests before merging.",
            &[r"\b(describe|it|test)\.skip\s*\(", r"\bxit\s*\(", r"\bxdescribe\s*\("])
            .only(TEST_FILES),
        line("testing.focused_test", Testing, Critical,
            "Focused tests silently disable the rest of the suite.",
            &[r"\b(describe|it|test)\.only\s*\(", r"\bfit\s*\(", r"\bfdescribe\s*\("])
            .only(TEST_FILES),
        line("testing.snapshot_overuse", Testing, Info,
            "Prefer explicit assertions over broad snapshots.",
            &[r"toMatchSnapshot\s*\("])
            .only(TEST_FILES),
        line("testing.commented_assertion", Testing, Info,
            "A commented-out expect usually hides a real failure.",
            &[r"^\s*//\s*expect\("])
            .only(TEST_FILES),
        line("testing.conditional_expect", Testing, Warning,
            "Assertions inside conditionals may never run.",
            &[r"if\s*\([^)]*\)\s*\{?\s*expect\("])
            .only(TEST_FILES),
        line("testing.hard_wait", Testing, Warning,
            "Fixed sleeps make tests slow and flaky; wait on a condition.",
            &[r"waitForTimeout\s*\(", r"=>\s*setTimeout\(\s*\w+\s*,\s*\d{3,}"])
            .only(TEST_FILES),
        line("testing.real_network_call", Testing, Warning,
            "Unit tests must stub the network.",
            &[r"\bfetch\(\s*['\x22]https?://", r"axios\.(get|post)\(\s*['\x22]https?://"])
            .only(TEST_FILES)
            .allow(&[r"localhost|127\.0\.0\.1|mock|msw|nock"]),
        line("testing.tautological_assertion", Testing, Info,
            "An assertion on a constant verifies nothing.",
            &[r"expect\(true\)\.toBe\(true\)", r"expect\(1\)\.toBe\(1\)"])
            .only(TEST_FILES),
        line("testing.long_timeout", Testing, Warning,
            "A five-figure test timeout usually hides a flaky wait.",
            &[r"(jest|vi)\.setTimeout\(\s*\d{5,}"])
            .only(TEST_FILES),
    ]
}

fn build_rules() -> Vec<RuleConfig> {
    vec![
        line("build.committed_env_file", Build, Critical,
            "Environment files must not be committed.",
            &[r"."])
            .only(&["**/.env", "**/.env.*"])
            .except(&["**/.env.example", "**/.env.*.example"]),
        line("build.wildcard_dependency", Build, Warning,
            "Wildcard dependency versions make builds irreproducible.",
            &[r#":\s*"\*""#])
            .only(&["**/package.json"]),
        line("build.latest_tag_dependency", Build, Warning,
            "The latest tag pins nothing; use a version range.",
            &[r#":\s*"latest""#])
            .only(&["**/package.json"]),
        line("build.git_dependency", Build, Warning,
            "Git dependencies bypass the registry and its integrity checks.",
            &[r#""(git\+|github:)"#])
            .only(&["**/package.json"]),
        line("build.postinstall_script", Build, Warning,
            "postinstall scripts run arbitrary code on every install; justify in review.",
            &[r#""postinstall"\s*:"#])
            .only(&["**/package.json"]),
        line("build.debug_inspector_flag", Build, Warning,
            "Remove node inspector flags from scripts and CI.",
            &[r"--inspect(-brk)?\b"])
            .only(&["**/package.json", "**/.github/workflows/**", "**/*.sh"]),
        line("build.skip_lib_check", Build, Info,
            "skipLibCheck hides type errors in dependencies.",
            &[r#""skipLibCheck"\s*:\s*true"#])
            .only(&["**/tsconfig*.json"]),
        line("build.legacy_peer_deps", Build, Warning,
            "--legacy-peer-deps papers over real dependency conflicts.",
            &[r"--legacy-peer-deps|--force\b"])
            .only(&["**/package.json", "**/.github/workflows/**"]),
        line("build.insecure_registry", Build, Warning,
            "Package registries must be reached over HTTPS.",
            &[r"^\s*registry\s*=\s*http://"])
            .only(&["**/.npmrc"]),
        line("build.npm_install_in_ci", Build, Info,
            "Use npm ci in CI so the lockfile is honored exactly.",
            &[r"\bnpm install\b"])
            .only(&["**/.github/workflows/**"]),
    ]
}
