//! Recognizer rules shared across the normalization and triage pipelines.
//!
//! Every matcher used by the text normalizer, markup normalizer, triage
//! classifier, and admission gate lives here as a named, individually testable
//! table entry. Regexes are compiled once on first use; the selector lists are
//! plain data consumed by the markup normalizer.

use regex::Regex;
use std::sync::OnceLock;

/// Addresses operated by automated systems rather than people.
///
/// Shared by triage rule 1 and the admission gate's blocked-sender check.
pub fn automated_sender() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(no-?reply|do-?not-?reply|donotreply|postmaster|mailer-daemon|bounces?|notifications?|alerts?|billing|invoices?|receipts?|statements?|marketing|newsletters?|news|updates?|digest|automated|auto-confirm|robot|bot|system|daemon)([._+-][^@]*)?@",
        )
        .expect("invalid automated sender regex")
    })
}

/// Subjects produced by automated systems: out-of-office replies, bounces,
/// password resets, receipts.
pub fn automated_subject() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(automatic reply|auto-?reply|autoresponse|out of (the )?office|delivery status notification|delivery (has )?failed|undeliverable|returned mail|failure notice|mail delivery (failed|subsystem)|password reset|reset your password|verify your (email|account)|confirm your (email|subscription)|your (receipt|invoice|order confirmation)|payment (received|confirmation))",
        )
        .expect("invalid automated subject regex")
    })
}

/// Closing phrases that typically precede a signature block, matched only at
/// the end of a line (an optional trailing comma is allowed).
pub fn valediction() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?im)^\s*(best regards|kind regards|warm regards|warmest regards|regards|best wishes|all the best|best|sincerely yours|sincerely|yours sincerely|yours truly|many thanks|thanks again|thanks so much|thank you again|thank you|thanks|thx|cheers|talk soon|take care|respectfully|cordially|warmly)\s*,?\s*$",
        )
        .expect("invalid valediction regex")
    })
}

/// Content shapes found in signature blocks: phone labels, bare phone numbers,
/// email addresses, URLs, company suffixes, job titles.
pub fn signature_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(\b(tel|telephone|phone|mobile|cell|fax|office|direct)\b\s*[:.]?\s*\+?[\d(]|\+?\d{1,3}[\s.-]\(?\d{2,4}\)?[\s.-]\d{3,4}([\s.-]\d{2,4})?|\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b|https?://|\bwww\.|\b(inc|llc|ltd|corp|gmbh|plc)\.?(\s|$)|\b(ceo|cto|cfo|coo|vp|vice president|president|director|manager|engineer|developer|consultant|founder|partner|account executive)\b)",
        )
        .expect("invalid signature marker regex")
    })
}

/// A line shaped like a real sentence: capitalized first word, at least three
/// more words, terminal punctuation on the same line. Used to veto signature
/// truncation when the tail still reads like conversation.
pub fn substantive_sentence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*[A-Z][A-Za-z']*(\s+\S+){2,}\s+\S*[.!?]\s*$")
            .expect("invalid substantive sentence regex")
    })
}

/// Legal boilerplate cue phrases. Everything from the first match onward is
/// discarded.
pub fn disclaimer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(confidentiality notice|this (e-?mail|message)( and any attachments)? (is|are|may be|contains?) (confidential|privileged)|intended only for the use of|intended solely for|if you are not the intended recipient|if you have received this (e-?mail|message) in error|unauthorized (disclosure|use|distribution|dissemination|review).{0,60}(prohibited|unlawful)|may contain (confidential|privileged|proprietary).{0,40}information|privileged and confidential)",
        )
        .expect("invalid disclaimer regex")
    })
}

/// "Please don't print this email" footers.
pub fn environmental_notice() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(please consider the environment before printing|consider the environment before you print|think before you print|do you really need to print this|save paper|go green[ ,.-]|be green[ ,.-])",
        )
        .expect("invalid environmental notice regex")
    })
}

/// Device and client signature lines ("Sent from my iPhone"), removed wherever
/// they occur.
pub fn mobile_signature() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?im)^[ \t]*(sent (from|via) (my )?(iphone|ipad|ipod|android( phone| device)?|mobile( device)?|samsung( galaxy)?( \S+)?|blackberry|windows phone|galaxy( \S+)?|phone|gmail mobile|outlook mobile|yahoo mail)|get outlook for (ios|android)|sent using \S+ mail)\b.*$",
        )
        .expect("invalid mobile signature regex")
    })
}

/// Forwarded-message header lines; text after the marker is dropped.
pub fn forwarded_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^\s*(-{2,}\s*forwarded message\s*-{2,}|begin forwarded message:)\s*$")
            .expect("invalid forwarded marker regex")
    })
}

/// Outlook-style reply separators: a long dash/underscore rule on its own
/// line, or a `From:` / `Sent:` / `To:` header block.
pub fn outlook_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*[-_]{10,}\s*$|^\s*From:.*\r?\n\s*Sent:.*\r?\n\s*To:.*$")
            .expect("invalid outlook separator regex")
    })
}

/// Quote attribution lines the reply extractor may have missed.
pub fn on_wrote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*On .{10,80} wrote:\s*$").expect("invalid on-wrote regex")
    })
}

/// Inline border style Outlook uses as a horizontal-rule reply divider.
pub fn outlook_border_style() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)border(-top)?\s*:\s*(none\s*;\s*border-top\s*:\s*)?solid\s+#?e1e1e1\s+1\.0pt")
            .expect("invalid outlook border regex")
    })
}

/// Selectors for client-specific quoted-content containers. Matching subtrees
/// are always deleted.
pub const QUOTED_CONTENT_SELECTORS: &[&str] = &[
    ".gmail_quote",
    ".gmail_extra",
    "blockquote[type=cite]",
    ".yahoo_quoted",
    ".moz-cite-prefix",
    "#OLK_SRC_BODY_SECTION",
    ".protonmail_quote",
    ".zmail_extra",
    ".front-blockquote",
];

/// Selectors for client-specific signature containers. Deleted unless doing so
/// would empty the whole document.
pub const SIGNATURE_CONTAINER_SELECTORS: &[&str] = &[
    ".gmail_signature",
    "[data-smartmail=gmail_signature]",
    "#Signature",
    ".Signature",
    "#signature",
    ".moz-signature",
    ".protonmail_signature_block",
];

/// Element ids marking the start of a reply/forward section; the element and
/// everything after it in its parent is deleted.
pub const CUTOFF_IDS: &[&str] = &["divRplyFwdMsg", "appendonsend", "reply-intro"];

/// Elements whose id starts with this prefix begin an unsubscribe footer.
pub const UNSUBSCRIBE_ID_PREFIX: &str = "unsub";

/// Tags treated as block-level when resolving an unsubscribe line to its
/// containing footer block.
pub const BLOCK_LEVEL_TAGS: &[&str] = &[
    "div",
    "p",
    "td",
    "li",
    "table",
    "section",
    "footer",
    "blockquote",
];

/// Whether an address belongs to an automated system sender.
pub fn is_automated_sender(email: &str) -> bool {
    automated_sender().is_match(email.trim())
}

/// Whether a subject line looks machine-generated.
pub fn is_automated_subject(subject: &str) -> bool {
    automated_subject().is_match(subject)
}
