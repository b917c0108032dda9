//! AppleScript text for every query and command the dashboard issues.

/// Escapes a value for embedding inside an AppleScript string literal.
///
/// Playlist names come from the external app and are treated as data: backslashes and
/// quotes are escaped, and line breaks collapse to spaces so they cannot end the literal.
pub fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\n', '\r'], " ")
}

/// Script builder bound to one target application.
#[derive(Debug, Clone)]
pub struct Scripts {
    app: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self::new("Music")
    }
}

impl Scripts {
    pub fn new(app_name: &str) -> Self {
        Self {
            app: escape(app_name),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app
    }

    /// `tell application "X" to <verb>` for single-verb transport commands.
    pub fn tell(&self, verb: &str) -> String {
        format!(r#"tell application "{}" to {verb}"#, self.app)
    }

    pub fn now_playing(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        if player state is stopped then
            return "STOPPED"
        end if
        set t to current track
        set n to name of t
        set a to artist of t
        set al to album of t
        set s to player state as string
        set d to duration of t
        set p to player position
        return n & "\n" & a & "\n" & al & "\n" & s & "\n" & d & "\n" & p
    end if
end tell
return "NOT_RUNNING"
"#,
            app = self.app
        )
    }

    pub fn playlists(&self) -> String {
        format!(
            r#"
set AppleScript's text item delimiters to "\n"
tell application "{app}"
    if it is running then
        set plist to name of playlists
        return plist as text
    end if
end tell
return "NOT_RUNNING"
"#,
            app = self.app
        )
    }

    pub fn up_next_ui(&self) -> String {
        format!(
            r#"
tell application "System Events"
    if not (exists process "{app}") then
        return "NO_PROCESS"
    end if
    tell process "{app}"
        if not (exists window 1) then
            return "NO_WINDOW"
        end if
        try
            set theTable to first table of scroll area 1 of window 1
            set row1 to first row of theTable
            set texts to value of static text of row1
            if (count of texts) >= 2 then
                return item 1 of texts & "\n" & item 2 of texts
            else if (count of texts) = 1 then
                return item 1 of texts
            else
                return "NO_TEXT"
            end if
        on error errMsg number errNum
            return "ERR:" & errNum & ":" & errMsg
        end try
    end tell
end tell
"#,
            app = self.app
        )
    }

    pub fn up_next_playlist(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        if player state is stopped then
            return "STOPPED"
        end if
        try
            set cp to current playlist
            set ct to current track
            set pid to persistent ID of ct
            set tracksList to tracks of cp
            repeat with i from 1 to count of tracksList
                if persistent ID of item i of tracksList is pid then
                    if i < count of tracksList then
                        set nt to item (i + 1) of tracksList
                        return name of nt & "\n" & artist of nt & "\n" & album of nt
                    else
                        return "END"
                    end if
                end if
            end repeat
            return "UNKNOWN"
        on error
            return "UNKNOWN"
        end try
    end if
end tell
return "NOT_RUNNING"
"#,
            app = self.app
        )
    }

    pub fn shuffle_state(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        try
            set thePlaylist to current playlist
            return shuffle enabled of thePlaylist as string
        on error
            try
                return shuffle enabled as string
            on error
                return "UNKNOWN"
            end try
        end try
    end if
end tell
return "UNKNOWN"
"#,
            app = self.app
        )
    }

    pub fn toggle_shuffle(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        try
            set thePlaylist to current playlist
            set shuffle enabled of thePlaylist to not shuffle enabled of thePlaylist
            return shuffle enabled of thePlaylist as string
        on error errMsg number errNum
            try
                set shuffle enabled to not shuffle enabled
                return shuffle enabled as string
            on error errMsg2 number errNum2
                return "ERR:" & errNum2 & ":" & errMsg2
            end try
        end try
    end if
end tell
return "NOT_RUNNING"
"#,
            app = self.app
        )
    }

    pub fn volume(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        return sound volume as string
    end if
end tell
return "-1"
"#,
            app = self.app
        )
    }

    pub fn set_volume(&self, level: u8) -> String {
        self.tell(&format!("set sound volume to {level}"))
    }

    pub fn repeat_mode(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        try
            return song repeat as string
        on error
            return "UNKNOWN"
        end try
    end if
end tell
return "UNKNOWN"
"#,
            app = self.app
        )
    }

    pub fn set_repeat(&self, value: &str) -> String {
        self.tell(&format!("set song repeat to {value}"))
    }

    pub fn current_playlist(&self) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        if player state is not stopped then
            try
                return name of current playlist
            on error
                return ""
            end try
        end if
    end if
end tell
return ""
"#,
            app = self.app
        )
    }

    pub fn set_position(&self, seconds: f64) -> String {
        self.tell(&format!("set player position to {seconds:.2}"))
    }

    pub fn play_playlist(&self, name: &str) -> String {
        format!(
            r#"
tell application "{app}"
    play playlist "{name}"
end tell
"#,
            app = self.app,
            name = escape(name)
        )
    }

    pub fn play_track(&self, playlist: &str, index: usize) -> String {
        format!(
            r#"
tell application "{app}"
    play track {index} of playlist "{name}"
end tell
"#,
            app = self.app,
            name = escape(playlist)
        )
    }

    /// Name, artist and duration of every track, one tab-separated line each.
    pub fn playlist_tracks(&self, playlist: &str) -> String {
        format!(
            r#"
tell application "{app}"
    if it is running then
        try
            set tl to tracks of playlist "{name}"
            set out to ""
            repeat with i from 1 to count of tl
                set t to item i of tl
                set out to out & name of t & tab & artist of t & tab & (duration of t as string) & "\n"
            end repeat
            return out
        end try
    end if
end tell
return "NONE"
"#,
            app = self.app,
            name = escape(playlist)
        )
    }

    /// Up to `max` rows of the "playing next" panel, which follows shuffle and manual
    /// queueing. The panel is opened for the read and closed again if it was shut.
    pub fn queue(&self, max: usize) -> String {
        format!(
            r#"
on toggle_panel(sg, wantOpen)
    set changed to false
    repeat with g in groups of sg
        try
            repeat with cb in checkboxes of g
                if description of cb is "playing next" then
                    if ((value of cb is 1) is not wantOpen) then
                        click cb
                        set changed to true
                    end if
                end if
            end repeat
        end try
    end repeat
    return changed
end toggle_panel

tell application "System Events"
    if not (exists process "{app}") then
        return "NO_PROCESS"
    end if
    tell process "{app}"
        if not (exists window 1) then
            return "NO_WINDOW"
        end if
        set sg to splitter group 1 of window 1
        set opened to my toggle_panel(sg, true)
        if opened then delay 1

        set out to ""
        try
            set cnt to 0
            repeat with r in rows of table 1 of scroll area 1 of group 3 of sg
                try
                    set txts to value of static text of UI element 1 of r
                    if (count of txts) >= 2 then
                        set songName to item 1 of txts as string
                        if songName is not in {{"History", "Playing Next", "Autoplay"}} then
                            set oldDelims to AppleScript's text item delimiters
                            set AppleScript's text item delimiters to " — "
                            set artistPart to text item 1 of (item 2 of txts as string)
                            set AppleScript's text item delimiters to oldDelims
                            set out to out & songName & tab & artistPart & "\n"
                            set cnt to cnt + 1
                            if cnt >= {max} then exit repeat
                        end if
                    end if
                end try
            end repeat
        end try

        if opened then my toggle_panel(sg, false)
        return out
    end tell
end tell
"#,
            app = self.app
        )
    }

    /// Walks the accessibility tree of the app's front window, six levels deep.
    pub fn dump_ui(&self) -> String {
        format!(
            r#"
on walk_element(el, depth)
    set pad to ""
    repeat depth times
        set pad to pad & "  "
    end repeat
    set line to pad
    try
        set line to line & (role of el as text)
    on error
        set line to line & "UNKNOWN_ROLE"
    end try
    try
        set sr to subrole of el as text
        set line to line & " / " & sr
    end try
    try
        set nm to name of el as text
        if nm is not "" then set line to line & " | " & nm
    end try
    set output to line & "\n"
    if depth < 6 then
        try
            set kids to UI elements of el
            repeat with child in kids
                set output to output & my walk_element(child, depth + 1)
            end repeat
        end try
    end if
    return output
end walk_element

tell application "System Events"
    if not (exists process "{app}") then
        return "NO_PROCESS"
    end if
    tell process "{app}"
        if not (exists window 1) then
            return "NO_WINDOW"
        end if
        try
            return my walk_element(window 1, 0)
        on error errMsg number errNum
            return "ERR:" & errNum & ":" & errMsg
        end try
    end tell
end tell
"#,
            app = self.app
        )
    }
}
