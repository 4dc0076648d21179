//! Expansion of each macro over realistic declarations.

mod common;

use common::{member_sources, peer_sources, sources};
use stylegen::ast::{AccessLevel, Declaration, MacroInvocation};
use stylegen::engine::{expand, ExpansionContext};
use stylegen::errors::SourceContext;
use stylegen::macros::Indent;

fn context() -> ExpansionContext {
    ExpansionContext::new(SourceContext::from_file("test.swift", ""))
}

// ============================================================================
// @Style
// ============================================================================

#[test]
fn style_with_two_sub_views() {
    let generated = expand(
        &MacroInvocation::style(["Title", "Icon"]),
        &Declaration::protocol("MyStyle"),
        &context(),
    )
    .unwrap();

    assert_eq!(
        member_sources(&generated),
        vec![
            "associatedtype Body: View",
            "typealias Configuration = MyStyleConfiguration",
            "@ViewBuilder func makeBody(configuration: Self.Configuration) -> Self.Body",
        ]
    );

    let peers = peer_sources(&generated);
    assert_eq!(peers.len(), 4);
    assert_eq!(
        peers[0],
        "\
public struct MyStyleConfiguration {
    public struct Title: View {
        public var body: AnyView

        public init<Content: View>(content: Content) {
            body = AnyView(content)
        }
    }
    public struct Icon: View {
        public var body: AnyView

        public init<Content: View>(content: Content) {
            body = AnyView(content)
        }
    }

    public var title: Self.Title
    public var icon: Self.Icon
}"
    );
    assert_eq!(
        peers[1],
        "\
public struct DefaultMyStyle: MyStyle {
    public init() {}

    public func makeBody(configuration: Configuration) -> some View {
        VStack {
            configuration.title
            configuration.icon
        }
    }
}"
    );
    assert!(peers[2].starts_with("struct AnyMyStyle: MyStyle {"));
    assert_eq!(
        peers[3],
        "\
struct MyStyleKey: EnvironmentKey {
    static let defaultValue = AnyMyStyle(style: DefaultMyStyle())
}"
    );
}

#[test]
fn style_without_sub_views() {
    let generated = expand(
        &MacroInvocation::style(Vec::<String>::new()),
        &Declaration::protocol("Empty"),
        &context(),
    )
    .unwrap();

    let peers = peer_sources(&generated);
    assert_eq!(peers[0], "public struct EmptyConfiguration {}");
    assert!(peers[1].contains("        VStack {}\n"));
    assert_eq!(generated.len(), 7);
}

#[test]
fn sub_view_property_lowercases_only_the_first_character() {
    let generated = expand(
        &MacroInvocation::style(["URLPreview"]),
        &Declaration::protocol("LinkStyle"),
        &context(),
    )
    .unwrap();
    let peers = peer_sources(&generated);
    assert!(peers[0].contains("public var uRLPreview: Self.URLPreview"));
    assert!(peers[1].contains("configuration.uRLPreview"));
}

#[test]
fn indent_width_follows_the_context() {
    let ctx = context().with_indent(Indent::spaces(2));
    let generated = expand(
        &MacroInvocation::style(["Title"]),
        &Declaration::protocol("S"),
        &ctx,
    )
    .unwrap();
    assert!(peer_sources(&generated)[3].contains("\n  static let defaultValue"));
}

// ============================================================================
// @RegisterStyle / @ConvenienceModifierForStyle
// ============================================================================

#[test]
fn register_style_adds_an_environment_property() {
    let generated = expand(
        &MacroInvocation::register_style("MyComponentStyle"),
        &Declaration::extension("EnvironmentValues"),
        &context(),
    )
    .unwrap();

    assert_eq!(
        sources(&generated),
        vec![
            "\
var myComponentStyle: AnyMyComponentStyle {
    get {
        self[MyComponentStyleKey.self]
    }
    set {
        self[MyComponentStyleKey.self] = newValue
    }
}"
        ]
    );
    assert!(generated[0].is_member());
}

#[test]
fn convenience_modifier_adds_a_view_method() {
    let generated = expand(
        &MacroInvocation::convenience_modifier("CardStyle"),
        &Declaration::extension("View"),
        &context(),
    )
    .unwrap();

    assert_eq!(
        sources(&generated),
        vec![
            "\
public func cardStyle(_ style: some CardStyle) -> some View {
    environment(\\.cardStyle, AnyCardStyle(style: style))
}"
        ]
    );
}

// ============================================================================
// @UIComponent
// ============================================================================

#[test]
fn ui_component_copies_access_onto_every_member() {
    let declaration = Declaration::structure("MyComponent")
        .with_generics(["Title", "Icon"])
        .with_access(AccessLevel::Public);
    let generated = expand(&MacroInvocation::ui_component(), &declaration, &context()).unwrap();

    assert!(generated.iter().all(|d| d.is_member()));
    assert_eq!(
        sources(&generated),
        vec![
            "@Environment(\\.myComponentStyle) public var style",
            "public typealias Configuration = MyComponentStyleConfiguration",
            "public let title: () -> Title",
            "public let icon: () -> Icon",
            "\
public var body: some View {
    style.makeBody(configuration: Configuration(title: Configuration.Title(content: title()), icon: Configuration.Icon(content: icon())))
}",
        ]
    );
}

#[test]
fn ui_component_keeps_non_public_access() {
    let declaration = Declaration::structure("Row")
        .with_generics(["Leading"])
        .with_access(AccessLevel::FilePrivate);
    let generated = expand(&MacroInvocation::ui_component(), &declaration, &context()).unwrap();

    let texts = sources(&generated);
    assert_eq!(texts[0], "@Environment(\\.rowStyle) fileprivate var style");
    assert_eq!(texts[2], "fileprivate let leading: () -> Leading");
}

#[test]
fn paired_style_and_component_agree_on_names() {
    let style = expand(
        &MacroInvocation::style(["Title", "Icon"]),
        &Declaration::protocol("MyComponentStyle"),
        &context(),
    )
    .unwrap();
    let component = expand(
        &MacroInvocation::ui_component(),
        &Declaration::structure("MyComponent").with_generics(["Title", "Icon"]),
        &context(),
    )
    .unwrap();

    let configuration = peer_sources(&style)[0];
    assert!(configuration.starts_with("public struct MyComponentStyleConfiguration {"));
    assert!(sources(&component)[1].ends_with("= MyComponentStyleConfiguration"));
    for property in ["public var title: Self.Title", "public var icon: Self.Icon"] {
        assert!(configuration.contains(property));
    }
}

// ============================================================================
// Failures produce nothing
// ============================================================================

#[test]
fn failing_invocations_generate_nothing() {
    let cases = [
        (
            MacroInvocation::style(["Title"]),
            Declaration::structure("NotAProtocol"),
        ),
        (
            MacroInvocation::register_style("S"),
            Declaration::extension("View"),
        ),
        (
            MacroInvocation::convenience_modifier("S"),
            Declaration::extension("String"),
        ),
        (
            MacroInvocation::ui_component(),
            Declaration::extension("View"),
        ),
    ];

    for (invocation, declaration) in cases {
        assert!(expand(&invocation, &declaration, &context()).is_err());
    }

    let expansion = common::expand_text(
        "@UIComponent\nprotocol P {}\n@Style(subViews: [\"A\", \"A\"])\nprotocol Q {}\n",
    );
    assert_eq!(expansion.generated_count(), 0);
    assert_eq!(expansion.errors().count(), 2);
}
