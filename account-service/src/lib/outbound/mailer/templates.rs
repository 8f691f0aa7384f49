/// HTML body for the password recovery OTP email.
///
/// Inline styles only: email clients strip stylesheet blocks.
pub fn otp_email(recipient_name: &str, code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Password Reset OTP</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f4f4; color: #333333;">
    <div style="max-width: 600px; margin: 40px auto; background-color: #ffffff; border-radius: 8px; box-shadow: 0 4px 8px rgba(0,0,0,0.1); overflow: hidden;">
        <div style="background-color: #4F46E5; padding: 30px; text-align: center;">
            <h1 style="color: #ffffff; margin: 0; font-size: 24px; font-weight: 600;">Password Reset Request</h1>
        </div>
        <div style="padding: 40px 30px;">
            <p style="font-size: 16px; line-height: 1.6; margin-bottom: 20px;">Hi {recipient_name},</p>
            <p style="font-size: 16px; line-height: 1.6; margin-bottom: 30px;">
                We received a request to reset your password. No changes have been made to your account yet.
                Use the one-time code below to complete the reset:
            </p>
            <div style="text-align: center; margin-bottom: 30px;">
                <span style="background-color: #4F46E5; color: #ffffff; padding: 14px 28px; border-radius: 4px; font-weight: 600; font-size: 24px; letter-spacing: 6px; display: inline-block;">{code}</span>
            </div>
            <p style="font-size: 14px; line-height: 1.6; color: #666666; margin-bottom: 10px;">
                If you did not request a password reset, you can safely ignore this email. Your password will remain valid.
            </p>
            <p style="font-size: 14px; line-height: 1.6; color: #666666;">
                This code will expire in 10 minutes for security reasons.
            </p>
        </div>
        <div style="background-color: #f9fafb; padding: 20px; text-align: center; border-top: 1px solid #eeeeee;">
            <p style="font-size: 12px; color: #999999; margin: 0;">
                If you did not initiate this request, no action is required.
            </p>
        </div>
    </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_email_embeds_name_and_code() {
        let html = otp_email("Ada Lovelace", "1234");

        assert!(html.contains("Hi Ada Lovelace,"));
        assert!(html.contains(">1234</span>"));
        assert!(html.contains("expire in 10 minutes"));
    }
}
