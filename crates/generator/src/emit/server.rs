//! Rewrite rules and crawler policy for static hosts.

use super::redirects::HashRedirect;
use prerender_kit_core::SiteConfig;
use std::fmt::Write;

/// Apache config: legacy 301s, SPA fallback, headers and caching
pub fn render_htaccess(redirects: &[HashRedirect]) -> String {
    let mut out = String::from("# Generated by prerender-kit\nOptions -Indexes\nErrorDocument 404 /404.html\n\n<IfModule mod_rewrite.c>\n  RewriteEngine On\n\n");

    for redirect in redirects {
        let _ = writeln!(
            out,
            "  RewriteRule ^{}/?$ {} [R=301,L]",
            redirect.source_path().trim_start_matches('/'),
            redirect.target
        );
    }

    out.push_str(
        r##"
  RewriteCond %{REQUEST_FILENAME} !-f
  RewriteCond %{REQUEST_FILENAME} !-d
  RewriteRule ^ /index.html [L]
</IfModule>

<IfModule mod_headers.c>
  Header always set X-Content-Type-Options "nosniff"
  Header always set X-Frame-Options "SAMEORIGIN"
  Header always set Referrer-Policy "strict-origin-when-cross-origin"

  <FilesMatch "\.html$">
    Header set Cache-Control "no-cache, no-store, must-revalidate"
  </FilesMatch>
</IfModule>

<IfModule mod_expires.c>
  ExpiresActive On
  ExpiresByType text/html "access plus 0 seconds"
</IfModule>

<If "%{REQUEST_URI} =~ m#^/assets/#">
  Header set Cache-Control "public, max-age=31536000, immutable"
</If>
"##,
    );
    out
}

/// Netlify-style `_redirects`; the SPA catch-all has to come last
pub fn render_netlify_redirects(redirects: &[HashRedirect]) -> String {
    let mut out = String::new();
    for redirect in redirects {
        let _ = writeln!(out, "{}  {}  301", redirect.source_path(), redirect.target);
        let _ = writeln!(out, "{}/  {}  301", redirect.source_path(), redirect.target);
    }
    out.push_str("/*  /index.html  200\n");
    out
}

pub fn render_robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.canonical_url("/sitemap.xml")
    )
}
