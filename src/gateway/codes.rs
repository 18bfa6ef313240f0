//! Fixed gateway code tables. The strings are the gateway's own published
//! messages and must stay byte-identical to them.

pub const UNKNOWN_CODE_MESSAGE: &str = "وضعیت مشخص شده معتبر نیست";

/// Message for the `result` field of request/verify responses.
pub fn result_code_message(code: i64) -> &'static str {
    match code {
        100 => "با موفقیت تایید شد",
        102 => "merchant یافت نشد",
        103 => "merchant غیرفعال",
        104 => "merchant نامعتبر",
        105 => "amount بایستی بزرگتر از 1,000 ریال باشد",
        106 => "callbackUrl نامعتبر می‌باشد. (شروع با http و یا https)",
        113 => "amount مبلغ تراکنش از سقف میزان تراکنش بیشتر است.",
        201 => "قبلا تایید شده",
        202 => "سفارش پرداخت نشده یا ناموفق بوده است",
        203 => "trackId نامعتبر می‌باشد",
        _ => UNKNOWN_CODE_MESSAGE,
    }
}

/// Message for the `status` field of the return callback (payer-side
/// outcome at the gateway).
pub fn status_code_message(code: i64) -> &'static str {
    match code {
        -1 => "در انتظار پردخت",
        -2 => "خطای داخلی",
        1 => "پرداخت شده - تاییدشده",
        2 => "پرداخت شده - تاییدنشده",
        3 => "لغوشده توسط کاربر",
        4 => "‌شماره کارت نامعتبر می‌باشد",
        5 => "‌موجودی حساب کافی نمی‌باشد",
        6 => "رمز واردشده اشتباه می‌باشد",
        7 => "‌تعداد درخواست‌ها بیش از حد مجاز می‌باشد",
        8 => "‌تعداد پرداخت اینترنتی روزانه بیش از حد مجاز می‌باشد",
        9 => "مبلغ پرداخت اینترنتی روزانه بیش از حد مجاز می‌باشد",
        10 => "‌صادرکننده‌ی کارت نامعتبر می‌باشد",
        11 => "خطای سوییچ",
        12 => "کارت قابل دسترسی نمی‌باشد",
        _ => UNKNOWN_CODE_MESSAGE,
    }
}
