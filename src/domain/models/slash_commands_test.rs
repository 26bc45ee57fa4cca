use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}
#[test]
fn it_leaves_questions_alone() {
    assert!(SlashCommand::parse("What is revenue?").is_none());
    assert!(SlashCommand::parse("/revenue by store").is_none());
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
}

#[test]
fn it_is_new_chat() {
    assert!(SlashCommand::parse("/new").unwrap().is_new_chat());
    assert!(SlashCommand::parse("/n").unwrap().is_new_chat());
}

#[test]
fn it_is_sign_out() {
    assert!(SlashCommand::parse("/signout").unwrap().is_sign_out());
    assert!(SlashCommand::parse("/logout").unwrap().is_sign_out());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_parses_chat_numbers() {
    let cmd = SlashCommand::parse("/chat 2").unwrap();
    assert!(cmd.is_select_chat());
    assert_eq!(cmd.chat_index(), Some(1));
}

#[test]
fn it_rejects_bad_chat_numbers() {
    assert_eq!(SlashCommand::parse("/chat").unwrap().chat_index(), None);
    assert_eq!(SlashCommand::parse("/chat 0").unwrap().chat_index(), None);
    assert_eq!(SlashCommand::parse("/chat two").unwrap().chat_index(), None);
}
