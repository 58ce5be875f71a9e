//! The CtxOS build-pipeline architecture a new editing session opens with.
//!
//! Layers run left to right: core modules, build scripts, backend services,
//! repository management, frontends, pipeline orchestration, build artifacts,
//! infrastructure, release, deployment targets.

use crate::serialization::Document;
use crate::{Edge, Node, NodeKind, NodePayload, PackageCount, Position};

/// (id, kind, x, y, label, description, variant detail)
type NodeRow = (&'static str, NodeKind, f64, f64, &'static str, &'static str, &'static str);

const NODES: &[NodeRow] = &[
    // Core modules
    ("mod-core", NodeKind::Module, 50.0, 50.0, "Core Module", "Base system utilities", "15"),
    ("mod-desktop", NodeKind::Module, 50.0, 150.0, "Desktop Module", "GNOME environment", "8"),
    ("mod-tools", NodeKind::Module, 50.0, 250.0, "Tools Module", "Development tools", "12"),
    ("mod-branding", NodeKind::Module, 50.0, 350.0, "Branding Module", "OS identity & themes", "3"),
    ("mod-apt", NodeKind::Module, 50.0, 450.0, "APT Module", "Repository config", "2"),
    ("mod-software-center", NodeKind::Module, 50.0, 550.0, "Software Center", "Package manager UI", "1"),
    // Build scripts
    ("script-build-debs", NodeKind::Script, 350.0, 150.0, "build-debs.sh", "Build meta-packages", ".deb files"),
    ("script-software-center", NodeKind::Script, 350.0, 550.0, "make build-deb", "Build Software Center", "software-center.deb"),
    // Backend services
    ("service-dbus", NodeKind::Stage, 650.0, 50.0, "DBus Service", "org.ctxos.SoftwareCenter", "System Service"),
    ("service-polkit", NodeKind::Stage, 650.0, 180.0, "Polkit Policy", "Permission management", "Security Layer"),
    ("service-snapshot", NodeKind::Stage, 650.0, 310.0, "Snapshot Manager", "System restore & rollback", "Backup Service"),
    // Repository management
    ("script-repo", NodeKind::Script, 650.0, 440.0, "manage-repo.sh", "Aptly repository", "APT repo"),
    // Frontends
    ("frontend-gtk", NodeKind::Artifact, 950.0, 50.0, "GTK4 Frontend", "Native desktop UI", "Python/GTK"),
    ("frontend-webview", NodeKind::Artifact, 950.0, 180.0, "Webview Frontend", "Web-based UI", "HTML/JS"),
    // Pipeline orchestration
    ("stage-pipeline", NodeKind::Stage, 950.0, 350.0, "Pipeline Master", "Orchestrate full build", "Running"),
    // Build artifacts
    ("artifact-docker", NodeKind::Artifact, 1300.0, 100.0, "Docker Image", "ctxos-base:latest", "OCI"),
    ("artifact-iso", NodeKind::Artifact, 1300.0, 250.0, "Live ISO", "Bootable image", "ISO 9660"),
    ("artifact-repo", NodeKind::Artifact, 1300.0, 400.0, "APT Repository", "Published packages", "Aptly"),
    ("artifact-website", NodeKind::Artifact, 1300.0, 550.0, "Website", "Project showcase", "HTML/CSS"),
    // Infrastructure
    ("infra-mirror", NodeKind::Script, 1650.0, 100.0, "mirror-sync.sh", "Upstream sync", "Local mirrors"),
    ("infra-security", NodeKind::Script, 1650.0, 250.0, "security-audit.sh", "Package scanning", "Security report"),
    ("script-validate", NodeKind::Script, 1650.0, 400.0, "validate-artifacts.sh", "Health checks", "Report"),
    // Release
    ("stage-release", NodeKind::Stage, 2000.0, 250.0, "Release", "Tag & publish", "Ready"),
    // Deployment targets
    ("deploy-github", NodeKind::Artifact, 2350.0, 100.0, "GitHub Release", "Public distribution", "Git tag"),
    ("deploy-ci", NodeKind::Artifact, 2350.0, 250.0, "CI/CD Pipeline", "Automated builds", "GitHub Actions"),
    ("deploy-users", NodeKind::Artifact, 2350.0, 400.0, "End Users", "Installation & updates", "APT/ISO"),
];

const EDGES: &[(&str, &str)] = &[
    ("mod-core", "script-build-debs"),
    ("mod-desktop", "script-build-debs"),
    ("mod-tools", "script-build-debs"),
    ("mod-branding", "script-build-debs"),
    ("mod-apt", "script-build-debs"),
    ("mod-software-center", "script-software-center"),
    ("script-build-debs", "service-dbus"),
    ("script-software-center", "service-dbus"),
    ("service-dbus", "service-polkit"),
    ("service-polkit", "service-snapshot"),
    ("script-build-debs", "script-repo"),
    ("script-software-center", "script-repo"),
    ("service-snapshot", "script-repo"),
    ("service-dbus", "frontend-gtk"),
    ("service-dbus", "frontend-webview"),
    ("script-repo", "stage-pipeline"),
    ("frontend-gtk", "stage-pipeline"),
    ("frontend-webview", "stage-pipeline"),
    ("stage-pipeline", "artifact-docker"),
    ("stage-pipeline", "artifact-iso"),
    ("stage-pipeline", "artifact-repo"),
    ("stage-pipeline", "artifact-website"),
    ("artifact-docker", "infra-mirror"),
    ("artifact-iso", "infra-security"),
    ("artifact-repo", "script-validate"),
    ("artifact-website", "script-validate"),
    ("infra-mirror", "stage-release"),
    ("infra-security", "stage-release"),
    ("script-validate", "stage-release"),
    ("stage-release", "deploy-github"),
    ("stage-release", "deploy-ci"),
    ("stage-release", "deploy-users"),
];

fn payload(kind: NodeKind, label: &str, description: &str, detail: &str) -> NodePayload {
    let detail = detail.to_string();
    match kind {
        NodeKind::Module => NodePayload::module(label, description, Some(PackageCount::Text(detail))),
        NodeKind::Script => NodePayload::script(label, description, Some(detail)),
        NodeKind::Artifact => NodePayload::artifact(label, description, Some(detail)),
        NodeKind::Stage => NodePayload::stage(label, description, Some(detail)),
    }
}

/// The full architecture graph, edges numbered `e1`..`e32`
pub fn ctxos_architecture() -> Document {
    let nodes = NODES
        .iter()
        .map(|&(id, kind, x, y, label, description, detail)| {
            Node::new(id, payload(kind, label, description, detail), Position::new(x, y))
        })
        .collect();

    let edges = EDGES
        .iter()
        .enumerate()
        .map(|(i, &(from, to))| Edge::new(format!("e{}", i + 1), from, to))
        .collect();

    Document::new(nodes, edges)
}
