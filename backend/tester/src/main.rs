use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PORTAL_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    form: SampleForm,
}

#[derive(Subcommand, Debug)]
enum SampleForm {
    /// Submit a complete professionals survey.
    Survey {
        #[arg(long, default_value = "tester@example.com")]
        email: String,

        #[arg(long, default_value = "9876543210")]
        mobile: String,
    },

    /// Send a contact message.
    Contact {
        #[arg(long, default_value = "tester@example.com")]
        email: String,
    },

    /// Subscribe an email to the newsletter.
    Subscribe {
        #[arg(long, default_value = "tester@example.com")]
        email: String,
    },
}

fn survey(email: &str, mobile: &str) -> Vec<(&'static str, String)> {
    let mut form: Vec<(&'static str, String)> = [
        ("fullName", "Test Submitter"),
        ("location", "Mumbai"),
        ("practicingAs", "CA"),
        ("caLicense", "100200"),
        ("practicingAs", "Lawyer"),
        ("lawyerLicense", "MH/2001/2015"),
        ("howOperate", "Individual practice"),
        ("annualIncome", "10-25 lakhs"),
        ("practiceLocation", "Metro city"),
        ("experience", "5-10 years"),
        ("teamMembers", "2-5"),
        ("juniorCompensation", "Fixed stipend"),
        ("painPoints", "Client acquisition"),
        ("painPoints", "otherPainPoints"),
        ("otherPainPointsText", "Delayed payments"),
        ("juniorIssues", "Attrition"),
        ("dataEntry", "High"),
        ("draftingManual", "Medium"),
        ("calculations", "Low"),
        ("research", "High"),
        ("reviewingWork", "Medium"),
        ("itToolBarriers", "Cost"),
        ("aiChallenges", "Accuracy"),
        ("aiView", "Helpful for routine drafting"),
        ("aiSoftwareLikelihood", "Likely"),
        ("referralFeeLikelihood", "Neutral"),
    ]
    .into_iter()
    .map(|(key, value)| (key, value.to_string()))
    .collect();

    form.push(("emailId", email.to_string()));
    form.push(("mobileNumber", mobile.to_string()));
    form
}

fn contact(email: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", "Test Submitter".to_string()),
        ("email", email.to_string()),
        ("mobile", "9876543210".to_string()),
        ("message", "Please call me back about the survey.".to_string()),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (path, form) = match &args.form {
        SampleForm::Survey { email, mobile } => ("/submit-survey", survey(email, mobile)),
        SampleForm::Contact { email } => ("/contact-us", contact(email)),
        SampleForm::Subscribe { email } => ("/subscribe", vec![("email", email.clone())]),
    };

    let url = format!("{}{path}", args.base_url.trim_end_matches('/'));
    let response = Client::new().post(&url).form(&form).send().await?;

    println!("{} {}", response.status(), url);

    let notice: Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&notice)?);

    Ok(())
}
