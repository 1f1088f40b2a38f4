//! Common regex patterns for statement line extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Month names and abbreviations, for embedding in larger patterns.
const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

lazy_static! {
    // Date tokens
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})$"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"(?i)^(\d{1,2})[\- ]([a-z]{3,9})[\- ,]*(\d{4}|\d{2})$"
    ).unwrap();

    pub static ref DATE_MONTH_NAME_DAY: Regex = Regex::new(
        r"(?i)^([a-z]{3,9})\.?\s+(\d{1,2}),?\s+(\d{4})$"
    ).unwrap();

    /// Any supported date token at the start of a line.
    pub static ref LEADING_DATE: Regex = Regex::new(&format!(
        r"(?i)^\s*(?:\d{{1,2}}[/.\-]\d{{1,2}}[/.\-](?:\d{{4}}|\d{{2}})|\d{{1,2}}[\- ](?:{m})[\- ,]*(?:\d{{4}}|\d{{2}})|(?:{m})\.?\s+\d{{1,2}},?\s+\d{{4}})\b",
        m = MONTHS
    )).unwrap();

    /// Date or amount tokens inside a summary value segment, left to right.
    pub static ref VALUE_TOKEN: Regex = Regex::new(&format!(
        r"(?i)(?P<date>\b\d{{1,2}}[/.\-]\d{{1,2}}[/.\-](?:\d{{4}}|\d{{2}})\b|\b\d{{1,2}}[\- ](?:{m})[\- ,]*(?:\d{{4}}|\d{{2}})\b|\b(?:{m})\.?\s+\d{{1,2}},?\s+\d{{4}}\b)|(?P<amount>\d[\d,]*(?:\.\d{{1,2}})?)",
        m = MONTHS
    )).unwrap();

    // Amounts
    /// A currency amount with two decimals anywhere in a line.
    pub static ref AMOUNT_SHAPED: Regex = Regex::new(
        r"\d[\d,]*\.\d{2}\b"
    ).unwrap();

    /// A single amount token with optional sign, parentheses, currency glyph and Dr/Cr marker.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"(?i)^\s*(?:(?P<pre>cr|dr)\.?\s+)?(?P<sign>[+\-])?\s*(?P<open>\()?\s*(?:rs\.?|inr|₹|`|r)?\s*(?P<digits>\d[\d,]*(?:\.\d+)?)\s*(?P<close>\))?\s*(?P<post>cr|dr)?\.?\s*$"
    ).unwrap();

    // Line shapes
    pub static ref PAGE_MARKER: Regex = Regex::new(
        r"(?i)^\s*-*\s*page\s+\d+(?:\s*(?:of|/)\s*\d+)?\s*-*\s*$"
    ).unwrap();

    pub static ref COLUMN_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:txn\.?\s*)?date\b.*\b(?:amount|description|details|particulars)\b"
    ).unwrap();

    pub static ref HEADER_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:credit\s+card\s+statement|statement\s+summary|account\s+summary|payment\s+summary|opening\s+balance|previous\s+balance|statement\s+(?:generation\s+)?date|statement\s+period|payment\s+due\s+date|card\s+(?:no|number)|customer\s+name|name\s*:|email|address|domestic\s+transactions|international\s+transactions|your\s+transactions|transaction\s+(?:details|description|particulars))\b"
    ).unwrap();

    /// Lines that close a transaction section.
    pub static ref SECTION_END: Regex = Regex::new(
        r"(?i)\b(?:reward\s+points|earnings?\s+points|key\s+offers|contact\s+us|end\s+of\s+statement|important\s+(?:information|messages?|notes?))\b"
    ).unwrap();

    /// Summary labels; each named group maps to one summary field.
    pub static ref SUMMARY_LABEL: Regex = Regex::new(
        r"(?i)\b(?:(?P<available_credit>available\s+credit(?:\s+limit)?)|(?P<cash_limit>(?:available\s+)?cash\s+limit)|(?P<credit_limit>(?:total\s+)?credit\s+limit)|(?P<total_dues>total\s+(?:amount\s+due|payment\s+due|dues?)|closing\s+balance)|(?P<minimum_due>minimum\s+(?:amount\s+(?:due|payable)|payment\s+due|due)|min\.?\s+(?:amount\s+)?due)|(?P<payment_due_date>(?:payment\s+)?due\s+date)|(?P<statement_date>statement\s+(?:generation\s+)?date)|(?P<statement_period>(?:statement|billing)\s+period))\b"
    ).unwrap();

    /// `Name : ...` style cardholder line, optionally followed by an email label.
    pub static ref CARDHOLDER_LABELLED: Regex = Regex::new(
        r"(?i)^\s*(?:customer\s+|card\s*holder\s+)?name\s*:\s*(?P<name>[a-z][a-z .']*?[a-z])\s*(?:email\b.*)?$"
    ).unwrap();

    /// Address-block name line led by an honorific.
    pub static ref CARDHOLDER_TITLED: Regex = Regex::new(
        r"^\s*(?i:mrs|mr|ms|dr)\.?\s+(?P<name>[A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)+)\s*$"
    ).unwrap();

    /// Masked card number ending.
    pub static ref CARD_LAST_4: Regex = Regex::new(
        r"[Xx*]{4}\s*(\d{4})\b"
    ).unwrap();

    // Bank row shapes
    pub static ref HDFC_ROW: Regex = Regex::new(
        r"(?i)^\s*(?P<date>\d{2}/\d{2}/\d{4})(?:\s+\d{2}:\d{2}(?::\d{2})?)?\s+(?P<desc>.*?[a-z].*?)\s+(?P<amount>\d[\d,]*\.\d{2}(?:\s*cr)?)\s*$"
    ).unwrap();

    pub static ref ICICI_ROW: Regex = Regex::new(
        r"(?i)^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+(?:\d{6,}\s+)?(?P<desc>.*?[a-z].*?)(?:\s+IN)?(?:\s+-?\d{1,6})?\s+[`₹]?\s*(?P<amount>\d[\d,]*\.\d{2}(?:\s*cr)?)\s*$"
    ).unwrap();

    pub static ref AXIS_ROW: Regex = Regex::new(
        r"(?i)^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.*?[a-z].*?)\s+(?P<amount>[+\-]?\s*\d[\d,]*\.\d{2}(?:\s*(?:dr|cr))?)\s*$"
    ).unwrap();

    /// Axis split layout: the date alone on its line.
    pub static ref DATE_ONLY: Regex = Regex::new(
        r"^\s*(?P<date>\d{2}/\d{2}/\d{4})\s*$"
    ).unwrap();

    /// Axis split layout: description and marked amount on the following line.
    pub static ref AXIS_SPLIT_BODY: Regex = Regex::new(
        r"(?i)^\s*(?P<desc>.*?[a-z].*?)\s+(?P<amount>\d[\d,]*\.\d{2}\s*(?:dr|cr))\s*$"
    ).unwrap();

    pub static ref AXIS_LIMITS_ROW: Regex = Regex::new(
        r"^\s*(?:\d{6})?\*{4,}(?P<last4>\d{4})\s+(?P<limit>\d[\d,]*\.\d{2})\s+(?P<available>\d[\d,]*\.\d{2})"
    ).unwrap();

    pub static ref IDFC_ROW: Regex = Regex::new(
        r"(?i)^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.*?[a-z].*?)\s+(?:(?:r|₹)\s*)?(?P<amount>\d[\d,]*\.\d{2}(?:\s*cr)?)\s*$"
    ).unwrap();

    pub static ref INDIAN_BANK_ROW: Regex = Regex::new(
        r"(?i)^\s*(?P<date>\d{2}-[a-z]{3}-\d{2,4})\s+(?P<desc>.*?[a-z].*?)\s+(?P<amount>(?:(?:cr|dr)\s+)?\d[\d,]*\.\d{2})\s*$"
    ).unwrap();

    /// Indian Bank: statement date, period and due date on one row.
    pub static ref INDIAN_BANK_DATES_ROW: Regex = Regex::new(
        r"^\s*(?P<statement>\d{2}-\d{2}-\d{2,4})\s+(?P<from>\d{2}-\d{2}-\d{2,4})\s*-\s*(?P<to>\d{2}-\d{2}-\d{2,4})\s+(?P<due>\d{2}-\d{2}-\d{2,4})\s*$"
    ).unwrap();

    /// Relaxed row: any leading date, optional text, trailing numeric token.
    pub static ref GENERIC_ROW: Regex = Regex::new(&format!(
        r"(?i)^\s*(?P<date>\d{{1,2}}[/.\-]\d{{1,2}}[/.\-](?:\d{{4}}|\d{{2}})|\d{{1,2}}[\- ](?:{m})[\- ,]*(?:\d{{4}}|\d{{2}})|(?:{m})\.?\s+\d{{1,2}},?\s+\d{{4}})\s+(?P<desc>.*?)\s*(?P<amount>[+\-]?\(?(?:\brs\.?|\binr|₹)?\s*\d[\d,]*(?:\.\d+)?\)?(?:\s*(?:cr|dr))?)\s*$",
        m = MONTHS
    )).unwrap();
}
