//! Framework catalog
//!
//! Each framework is described as data: the markers that reveal it, its
//! declared rendering affinity, the framework it supersedes when both are
//! present, and how much client runtime it implies. Catalog order is the
//! order frameworks are reported in.

/// A single independent evidence probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A global-scope sentinel defined by the page runtime
    Global(&'static str),
    /// A CSS selector matching at least one element
    Selector(&'static str),
    /// Every listed selector matching at least one element
    AllSelectors(&'static [&'static str]),
    /// An attribute on the root `<html>` element
    RootAttribute(&'static str),
    /// Any element carrying an attribute whose name starts with the prefix
    AttributePrefix(&'static str),
    /// A substring of the serialized DOM
    Markup(&'static str),
    /// A substring of the concatenated script sources
    ScriptSource(&'static str),
    /// A `<meta name="generator">` whose content contains the value
    Generator(&'static str),
}

/// Declared rendering affinity of a framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// Renders on the server; markup arrives with content
    Ssr,
    /// Renders in the browser; markup arrives as a shell
    Csr,
    /// Can do either; no evidence on its own
    Neutral,
}

/// How much client runtime a framework implies for the dependency score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuntimeWeight {
    #[default]
    Light,
    ServerCapable,
    Heavy,
}

/// One catalog record
#[derive(Debug, Clone, Copy)]
pub struct FrameworkSpec {
    pub name: &'static str,
    pub markers: &'static [Marker],
    pub affinity: Affinity,
    pub overrides: Option<&'static str>,
    pub weight: RuntimeWeight,
}

pub static CATALOG: &[FrameworkSpec] = &[
    // React ecosystem
    FrameworkSpec {
        name: "React",
        markers: &[
            Marker::Global("__REACT_DEVTOOLS_GLOBAL_HOOK__"),
            Marker::Selector("[data-reactroot], [data-reactid]"),
            Marker::Markup("_reactRootContainer"),
            Marker::ScriptSource("react"),
            Marker::Selector("#root"),
            Marker::Global("__REACT_ERROR_OVERLAY__"),
            Marker::Global("__REACT_QUERY_DEVTOOLS__"),
        ],
        affinity: Affinity::Csr,
        overrides: None,
        weight: RuntimeWeight::Heavy,
    },
    FrameworkSpec {
        name: "Next.js",
        markers: &[
            Marker::AllSelectors(&["#__next", "script#__NEXT_DATA__"]),
            Marker::Global("__NEXT_DATA__"),
            Marker::Generator("Next.js"),
        ],
        affinity: Affinity::Ssr,
        overrides: Some("React"),
        weight: RuntimeWeight::ServerCapable,
    },
    FrameworkSpec {
        name: "Remix",
        markers: &[
            Marker::Global("__remixContext"),
            Marker::Selector("script[type=\"text/remix-data\"]"),
            Marker::ScriptSource("@remix-run/"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::ServerCapable,
    },
    // Vue ecosystem
    FrameworkSpec {
        name: "Vue",
        markers: &[
            Marker::Global("Vue"),
            Marker::AttributePrefix("data-v-"),
            Marker::ScriptSource("vue"),
            Marker::Selector("[v-cloak], [v-show], [v-if]"),
        ],
        affinity: Affinity::Neutral,
        overrides: None,
        weight: RuntimeWeight::Heavy,
    },
    FrameworkSpec {
        name: "Nuxt.js",
        markers: &[
            Marker::Selector("#__nuxt"),
            Marker::Selector("script#__NUXT_DATA__"),
            Marker::Global("__NUXT__"),
            Marker::ScriptSource("/_nuxt/"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::ServerCapable,
    },
    // Angular ecosystem
    FrameworkSpec {
        name: "Angular",
        markers: &[
            Marker::Global("angular"),
            Marker::Selector("[ng-version]"),
            Marker::ScriptSource("angular"),
            Marker::Selector("[ng-app], [ng-controller]"),
            Marker::Global("getAllAngularRootElements"),
        ],
        affinity: Affinity::Neutral,
        overrides: None,
        weight: RuntimeWeight::Heavy,
    },
    FrameworkSpec {
        name: "Universal",
        markers: &[
            Marker::Selector("script[src*=\"server/main\"]"),
            Marker::Selector("script#__UNIVERSAL_DATA__"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::Light,
    },
    // Svelte ecosystem
    FrameworkSpec {
        name: "Svelte",
        markers: &[
            Marker::ScriptSource("svelte"),
            Marker::Selector("style[data-svelte]"),
        ],
        affinity: Affinity::Neutral,
        overrides: None,
        weight: RuntimeWeight::Heavy,
    },
    FrameworkSpec {
        name: "SvelteKit",
        markers: &[
            Marker::RootAttribute("data-sveltekit"),
            Marker::Global("__SVELTEKIT_APP__"),
            Marker::Selector("script[data-sveltekit]"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::ServerCapable,
    },
    // Other modern frameworks
    FrameworkSpec {
        name: "Astro",
        markers: &[
            Marker::RootAttribute("data-astro-cid"),
            Marker::Selector("script[type=\"module\"][data-astro-script]"),
            Marker::Generator("Astro"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::Light,
    },
    FrameworkSpec {
        name: "Qwik",
        markers: &[
            Marker::Global("qwikCity"),
            Marker::AttributePrefix("q:container"),
            Marker::ScriptSource("@builder.io/qwik"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::Light,
    },
    FrameworkSpec {
        name: "Solid",
        markers: &[
            Marker::Global("$SOLID"),
            Marker::Selector("[data-hk]"),
            Marker::ScriptSource("@solidjs/"),
        ],
        affinity: Affinity::Neutral,
        overrides: None,
        weight: RuntimeWeight::Heavy,
    },
    FrameworkSpec {
        name: "SolidStart",
        markers: &[
            Marker::Selector("script[solid-entry]"),
            Marker::Generator("SolidStart"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::Light,
    },
    FrameworkSpec {
        name: "Gatsby",
        markers: &[
            Marker::Global("___gatsby"),
            Marker::Selector("div#___gatsby"),
            Marker::ScriptSource("gatsby"),
        ],
        affinity: Affinity::Ssr,
        overrides: None,
        weight: RuntimeWeight::Light,
    },
];

/// Looks up a catalog record by framework name
pub fn find_framework(name: &str) -> Option<&'static FrameworkSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
