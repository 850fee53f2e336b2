//! Classification of saved documents into deployable artefact kinds.
//!
//! Classification is a pure function of the document path. Each variant of
//! [`Artifact`] carries exactly the identifiers its deployment strategy needs
//! to address the remote record.

use std::fmt;

use crate::document::Document;

/// Kind tag of an [`Artifact`], used for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A file inside an Aura bundle.
    AuraDefinition,
    /// A file inside a Lightning web component bundle.
    LightningComponentResource,
    /// A static resource body.
    StaticResource,
    /// Any member compiled through a tooling metadata container.
    ContainerMetadata,
}

impl ArtifactKind {
    /// Remote type name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuraDefinition => "AuraDefinition",
            Self::LightningComponentResource => "LightningComponentResource",
            Self::StaticResource => "StaticResource",
            Self::ContainerMetadata => "ContainerMetadata",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A deployable artefact derived from a document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// A file inside an Aura bundle.
    Aura(AuraTarget),
    /// A file inside a Lightning web component bundle.
    LwcResource(LwcTarget),
    /// A static resource body.
    StaticResource(StaticResourceTarget),
    /// A member compiled through a tooling metadata container.
    Container(ContainerTarget),
}

impl Artifact {
    /// Kind tag of this artefact.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::Aura(_) => ArtifactKind::AuraDefinition,
            Self::LwcResource(_) => ArtifactKind::LightningComponentResource,
            Self::StaticResource(_) => ArtifactKind::StaticResource,
            Self::Container(_) => ArtifactKind::ContainerMetadata,
        }
    }
}

/// Addressing data for an Aura definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuraTarget {
    /// Bundle (folder) name.
    pub bundle_name: String,
    /// Definition type of the file within the bundle.
    pub def_type: AuraDefType,
}

/// Definition types of files inside an Aura bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuraDefType {
    /// `.cmp` markup.
    Component,
    /// `.app` markup.
    Application,
    /// `.evt` markup.
    Event,
    /// `.intf` markup.
    Interface,
    /// `*Controller.js`.
    Controller,
    /// `*Helper.js`.
    Helper,
    /// `*Renderer.js`.
    Renderer,
    /// `.css`.
    Style,
    /// `.auradoc`.
    Documentation,
    /// `.design`.
    Design,
    /// `.svg`.
    Svg,
    /// `.tokens`.
    Tokens,
}

impl AuraDefType {
    /// Derives the definition type from a bundle file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let suffixes = [
            ("Controller.js", Self::Controller),
            ("Helper.js", Self::Helper),
            ("Renderer.js", Self::Renderer),
        ];
        if let Some((_, def_type)) = suffixes
            .iter()
            .find(|(suffix, _)| name.len() > suffix.len() && name.ends_with(suffix))
        {
            return Some(*def_type);
        }

        match extension(name)? {
            "cmp" => Some(Self::Component),
            "app" => Some(Self::Application),
            "evt" => Some(Self::Event),
            "intf" => Some(Self::Interface),
            "css" => Some(Self::Style),
            "auradoc" => Some(Self::Documentation),
            "design" => Some(Self::Design),
            "svg" => Some(Self::Svg),
            "tokens" => Some(Self::Tokens),
            _ => None,
        }
    }

    /// `DefType` value used by the remote API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "COMPONENT",
            Self::Application => "APPLICATION",
            Self::Event => "EVENT",
            Self::Interface => "INTERFACE",
            Self::Controller => "CONTROLLER",
            Self::Helper => "HELPER",
            Self::Renderer => "RENDERER",
            Self::Style => "STYLE",
            Self::Documentation => "DOCUMENTATION",
            Self::Design => "DESIGN",
            Self::Svg => "SVG",
            Self::Tokens => "TOKENS",
        }
    }
}

impl fmt::Display for AuraDefType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Addressing data for a Lightning web component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LwcTarget {
    /// Bundle (folder) name.
    pub bundle_name: String,
    /// Definition type derived from the file extension.
    pub def_type: LwcDefType,
    /// File name without its last extension.
    pub file_stem: String,
}

impl LwcTarget {
    /// Resource path inside the bundle, as stored remotely.
    #[must_use]
    pub fn file_path(&self) -> String {
        format!(
            "lwc/{}/{}.{}",
            self.bundle_name, self.file_stem, self.def_type
        )
    }

    /// `Format` recorded on the resource row.
    ///
    /// Metadata deployments store `.js-meta.xml` resources with format `js`,
    /// so `xml` resources are looked up and written with that format too.
    #[must_use]
    pub const fn resource_format(&self) -> LwcDefType {
        match self.def_type {
            LwcDefType::Xml => LwcDefType::Js,
            other => other,
        }
    }
}

/// Definition types of files inside a Lightning web component bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LwcDefType {
    /// JavaScript module.
    Js,
    /// HTML template.
    Html,
    /// Stylesheet.
    Css,
    /// SVG icon.
    Svg,
    /// `.js-meta.xml` bundle configuration.
    Xml,
}

impl LwcDefType {
    /// Derives the definition type from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "js" => Some(Self::Js),
            "html" => Some(Self::Html),
            "css" => Some(Self::Css),
            "svg" => Some(Self::Svg),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Lower-case identifier used by the remote API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Html => "html",
            Self::Css => "css",
            Self::Svg => "svg",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for LwcDefType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Addressing data for a static resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResourceTarget {
    /// Resource name (file name without extension).
    pub name: String,
}

impl StaticResourceTarget {
    /// Lookup query for the resource id.
    #[must_use]
    pub fn lookup_query(&self) -> String {
        let escaped = self.name.replace('\\', "\\\\").replace('\'', "\\'");
        format!("SELECT Id FROM StaticResource WHERE Name = '{escaped}'")
    }
}

/// Addressing data for a metadata container member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTarget {
    /// Tooling type of the member.
    pub container_type: ContainerType,
    /// Member name (file name without extension).
    pub full_name: String,
}

/// Tooling types compiled through a metadata container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerType {
    /// `.cls`.
    ApexClass,
    /// `.trigger`.
    ApexTrigger,
    /// `.page`.
    ApexPage,
    /// `.component`.
    ApexComponent,
}

impl ContainerType {
    /// Derives the tooling type from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "cls" => Some(Self::ApexClass),
            "trigger" => Some(Self::ApexTrigger),
            "page" => Some(Self::ApexPage),
            "component" => Some(Self::ApexComponent),
            _ => None,
        }
    }

    /// Tooling type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApexClass => "ApexClass",
            Self::ApexTrigger => "ApexTrigger",
            Self::ApexPage => "ApexPage",
            Self::ApexComponent => "ApexComponent",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Classifies a document by its path.
///
/// Returns `None` when the path matches no deployable layout; callers treat
/// that as a silent no-op.
#[must_use]
pub fn classify(document: &Document) -> Option<Artifact> {
    let path = document.unix_path();
    let mut segments = path.rsplit('/');
    let file_name = segments.next()?;
    let parent = segments.next().unwrap_or_default();
    let grandparent = segments.next().unwrap_or_default();
    let file_stem = document.file_stem().to_owned();

    if grandparent == "aura" && !parent.is_empty() {
        let def_type = AuraDefType::from_file_name(file_name)?;
        return Some(Artifact::Aura(AuraTarget {
            bundle_name: parent.to_owned(),
            def_type,
        }));
    }

    if grandparent == "lwc" && !parent.is_empty() {
        let def_type = LwcDefType::from_extension(extension(file_name)?)?;
        return Some(Artifact::LwcResource(LwcTarget {
            bundle_name: parent.to_owned(),
            def_type,
            file_stem,
        }));
    }

    let suffix = extension(file_name)?;
    if parent == "staticresources" && suffix == "resource" {
        return Some(Artifact::StaticResource(StaticResourceTarget {
            name: file_stem,
        }));
    }

    ContainerType::from_extension(suffix).map(|container_type| {
        Artifact::Container(ContainerTarget {
            container_type,
            full_name: file_stem,
        })
    })
}

/// Path used for exclusion matching: the document path in `/` form with the
/// first occurrence of `<workspace root>/src/` removed.
///
/// Documents outside the source folder keep their full path, so relative
/// exclusion globs never match them.
#[must_use]
pub fn workspace_relative_path(document: &Document, workspace_root: Option<&str>) -> String {
    let path = document.unix_path();
    let Some(root) = workspace_root else {
        return path;
    };
    let unix_root = root.replace('\\', "/");
    let base = format!("{}/src/", unix_root.trim_end_matches('/'));
    path.replacen(&base, "", 1)
}

fn extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
}
