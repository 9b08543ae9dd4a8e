use indexmap::IndexMap;
use regex::Regex;
use stencil::error::Error;
use stencil::pattern::Pattern;
use stencil::replace::{resolve, ReplaceOptions, ReplaceRule};

fn substring_rule(find: &str, replace: &str, options: ReplaceOptions) -> ReplaceRule {
    ReplaceRule {
        description: format!("{find} -> {replace}"),
        find: Pattern::Substring(find.to_string()),
        replace: replace.to_string(),
        options,
        files: None,
    }
}

fn no_tokens() -> IndexMap<String, String> {
    IndexMap::new()
}

fn tokens(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn no_contents() -> stencil::error::Result<String> {
    unreachable!("file contents should not be read")
}

#[test]
fn test_returns_none_when_no_rule_matches() {
    let rules = vec![substring_rule("Missing", "Widget", ReplaceOptions::default())];
    let result =
        resolve("main.rs", "out/main.rs", &rules, &no_tokens(), false, no_contents).unwrap();
    assert_eq!(result, None);
}

#[test]
fn test_name_and_path_replaced_with_default_options() {
    let rules = vec![substring_rule("MyApp", "Widget", ReplaceOptions::default())];
    let result = resolve(
        "MyApp.txt",
        "out/MyApp.txt",
        &rules,
        &no_tokens(),
        false,
        no_contents,
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.file_name.as_deref(), Some("Widget.txt"));
    assert_eq!(result.file_path.as_deref(), Some("out/Widget.txt"));
    assert_eq!(result.file_contents, None);
    assert_eq!(result.descriptions, vec!["MyApp -> Widget".to_string()]);
}

#[test]
fn test_untouched_targets_stay_none() {
    let options = ReplaceOptions { file_path: false, ..Default::default() };
    let rules = vec![substring_rule("MyApp", "Widget", options)];
    let result = resolve(
        "MyApp.txt",
        "out/MyApp.txt",
        &rules,
        &no_tokens(),
        false,
        no_contents,
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.file_name.as_deref(), Some("Widget.txt"));
    assert_eq!(result.file_path, None);
}

#[test]
fn test_substitutions_compose_across_rules_in_order() {
    let rules = vec![
        substring_rule("A", "B", ReplaceOptions::default()),
        substring_rule("B", "C", ReplaceOptions::default()),
    ];
    let result =
        resolve("A.txt", "out/A.txt", &rules, &no_tokens(), false, no_contents)
            .unwrap()
            .unwrap();

    // The second rule operates on the first rule's output.
    assert_eq!(result.file_name.as_deref(), Some("C.txt"));
    assert_eq!(
        result.descriptions,
        vec!["A -> B".to_string(), "B -> C".to_string()]
    );
}

#[test]
fn test_later_rule_skipped_when_earlier_output_no_longer_matches() {
    let rules = vec![
        substring_rule("A", "B", ReplaceOptions::default()),
        substring_rule("A", "C", ReplaceOptions::default()),
    ];
    let result =
        resolve("A.txt", "out/A.txt", &rules, &no_tokens(), false, no_contents)
            .unwrap()
            .unwrap();

    assert_eq!(result.file_name.as_deref(), Some("B.txt"));
    assert_eq!(result.descriptions, vec!["A -> B".to_string()]);
}

#[test]
fn test_contents_replaced_for_files_only_when_enabled() {
    let options = ReplaceOptions {
        file_name: false,
        file_path: false,
        file_contents: true,
        ..Default::default()
    };
    let rules = vec![substring_rule("MyApp", "Widget", options)];
    let result = resolve(
        "config.js",
        "out/config.js",
        &rules,
        &no_tokens(),
        false,
        || Ok("class MyApp {}".to_string()),
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.file_contents.as_deref(), Some("class Widget {}"));
    assert_eq!(result.file_name, None);
    assert_eq!(result.file_path, None);
}

#[test]
fn test_directories_never_content_match() {
    let options = ReplaceOptions {
        file_name: false,
        file_path: false,
        file_contents: true,
        ..Default::default()
    };
    let mut rule = substring_rule("MyApp", "Widget", options);
    rule.files = Some(vec!["MyAppDir".to_string()]);
    let result =
        resolve("MyAppDir", "out/MyAppDir", &[rule], &no_tokens(), true, no_contents).unwrap();
    assert_eq!(result, None);
}

#[test]
fn test_contents_not_read_when_no_rule_needs_them() {
    let rules = vec![substring_rule("MyApp", "Widget", ReplaceOptions::default())];
    // The closure would panic if invoked.
    let result = resolve(
        "MyApp.txt",
        "out/MyApp.txt",
        &rules,
        &no_tokens(),
        false,
        no_contents,
    )
    .unwrap()
    .unwrap();
    assert_eq!(result.file_name.as_deref(), Some("Widget.txt"));
}

#[test]
fn test_read_error_is_propagated() {
    let options = ReplaceOptions { file_contents: true, ..Default::default() };
    let rules = vec![substring_rule("MyApp", "Widget", options)];
    let result = resolve("plain.txt", "out/plain.txt", &rules, &no_tokens(), false, || {
        Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        )))
    });
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_files_restriction_gates_contents_by_name() {
    let options = ReplaceOptions {
        file_name: false,
        file_path: false,
        file_contents: true,
        ..Default::default()
    };
    let mut rule = substring_rule("MyApp", "Widget", options);
    rule.files = Some(vec!["config.js".to_string()]);

    let matching = resolve(
        "config.js",
        "out/other/config.js",
        std::slice::from_ref(&rule),
        &no_tokens(),
        false,
        || Ok("class MyApp {}".to_string()),
    )
    .unwrap()
    .unwrap();
    assert_eq!(matching.file_contents.as_deref(), Some("class Widget {}"));

    // A file not in the list is left alone; the contents are never read.
    let suppressed = resolve(
        "main.js",
        "out/main.js",
        std::slice::from_ref(&rule),
        &no_tokens(),
        false,
        no_contents,
    )
    .unwrap();
    assert_eq!(suppressed, None);
}

#[test]
fn test_files_restriction_matches_path_fragments() {
    let options = ReplaceOptions {
        file_name: false,
        file_path: false,
        file_contents: true,
        ..Default::default()
    };
    let mut rule = substring_rule("MyApp", "Widget", options);
    rule.files = Some(vec!["conf/app".to_string()]);

    let result = resolve(
        "app.js",
        "out/conf/app.js",
        &[rule],
        &no_tokens(),
        false,
        || Ok("let app = new MyApp();".to_string()),
    )
    .unwrap()
    .unwrap();
    assert_eq!(result.file_contents.as_deref(), Some("let app = new Widget();"));
}

#[test]
fn test_path_find_separators_are_normalized() {
    let options = ReplaceOptions { file_name: false, ..Default::default() };
    let rules = vec![substring_rule(r"src\app", "src/core", options)];
    let joined_in = format!("out{0}src{0}app{0}mod.rs", std::path::MAIN_SEPARATOR);
    let joined_out = format!("out{0}src{0}core{0}mod.rs", std::path::MAIN_SEPARATOR);

    let result = resolve("mod.rs", &joined_in, &rules, &no_tokens(), false, no_contents)
        .unwrap()
        .unwrap();
    assert_eq!(result.file_path.as_deref(), Some(joined_out.as_str()));
}

#[test]
fn test_regex_find_against_name() {
    let options = ReplaceOptions { file_path: false, ..Default::default() };
    let rules = vec![ReplaceRule {
        description: "versioned names".to_string(),
        find: Pattern::Regex(Regex::new(r"-v\d+").unwrap()),
        replace: "".to_string(),
        options,
        files: None,
    }];
    let result = resolve(
        "app-v3.toml",
        "out/app-v3.toml",
        &rules,
        &no_tokens(),
        false,
        no_contents,
    )
    .unwrap()
    .unwrap();
    assert_eq!(result.file_name.as_deref(), Some("app.toml"));
}

#[test]
fn test_token_indirection_and_maintain_case() {
    let options = ReplaceOptions {
        file_path: false,
        file_contents: true,
        maintain_case: true,
        ..Default::default()
    };
    let rules = vec![ReplaceRule {
        description: "brand the template".to_string(),
        find: Pattern::Regex(Regex::new("(?i)template").unwrap()),
        replace: "appName".to_string(),
        options,
        files: None,
    }];
    let tokens = tokens(&[("appName", "widget")]);

    let result = resolve(
        "template.cfg",
        "out/template.cfg",
        &rules,
        &tokens,
        false,
        || Ok("TEMPLATE is Template".to_string()),
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.file_name.as_deref(), Some("widget.cfg"));
    assert_eq!(result.file_contents.as_deref(), Some("WIDGET is Widget"));
}

#[test]
fn test_name_and_contents_rewritten_while_path_untouched() {
    let options = ReplaceOptions {
        file_name: true,
        file_path: false,
        file_contents: true,
        maintain_case: false,
    };
    let rules = vec![ReplaceRule {
        description: "appName".to_string(),
        find: Pattern::Substring("MyApp".to_string()),
        replace: "appName".to_string(),
        options,
        files: None,
    }];
    let tokens = tokens(&[("appName", "Widget")]);

    let result = resolve(
        "MyApp.config.js",
        "out/MyApp.config.js",
        &rules,
        &tokens,
        false,
        || Ok("class MyApp {}".to_string()),
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.file_name.as_deref(), Some("Widget.config.js"));
    assert_eq!(result.file_contents.as_deref(), Some("class Widget {}"));
    assert_eq!(result.file_path, None);
}
