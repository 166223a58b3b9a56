//! 브라우저에 보여줄 HTML 페이지
//!
//! 실패 페이지에는 사유별 고정 문구만 담기며 내부 에러 내용은 노출하지 않습니다.

use crate::errors::errors::CallbackError;

const PAGE_STYLE: &str = r#"
        body {
            background-color: #000000;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            margin: 0;
            font-family: Arial, sans-serif;
        }
        .auth-box {
            padding: 30px 50px;
            border-radius: 15px;
            text-align: center;
            color: white;
        }
        .auth-box.success {
            background: linear-gradient(45deg, #9b42f5, #7a19f3);
            box-shadow: 0 0 20px rgba(155, 66, 245, 0.5);
            animation: glow 2s infinite alternate;
        }
        .auth-box.failure {
            background: linear-gradient(45deg, #f54242, #c21919);
        }
        @keyframes glow {
            from { box-shadow: 0 0 20px rgba(155, 66, 245, 0.5); }
            to { box-shadow: 0 0 30px rgba(155, 66, 245, 0.8); }
        }
        .icon {
            font-size: 24px;
            margin-bottom: 10px;
        }
        .detail {
            margin-top: 8px;
            font-size: 14px;
            opacity: 0.8;
        }
"#;

fn render(class: &str, icon: &str, headline: &str, detail: Option<&str>, script: &str) -> String {
    let detail = detail
        .map(|text| format!(r#"<div class="detail">{}</div>"#, text))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{headline}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="auth-box {class}">
        <div class="icon">{icon}</div>
        {headline}
        {detail}
    </div>
    {script}
</body>
</html>"#
    )
}

/// 인증 성공 페이지. 3초 후 창을 닫습니다.
pub fn success_page() -> String {
    render(
        "success",
        "✨",
        "Authorization Successful!",
        None,
        "<script>setTimeout(() => window.close(), 3000);</script>",
    )
}

/// 실패 사유에 맞는 안내 페이지
pub fn failure_page(error: &CallbackError) -> String {
    let detail = match error {
        CallbackError::MissingCode => "No authorization code was received.",
        CallbackError::InvalidRequest(_) => "The authorization request was malformed.",
        CallbackError::Exchange(_) => "Discord could not confirm the authorization.",
        CallbackError::Store(_) => "The authorization could not be saved right now.",
    };

    render(
        "failure",
        "❌",
        "Authorization failed. Please try again.",
        Some(detail),
        "",
    )
}
